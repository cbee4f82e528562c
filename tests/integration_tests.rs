//! Integration tests for the whole front end.
//!
//! These tests run complete programs through tokenization, parsing and
//! semantic analysis using only the crate's public API.

use viper::{
    ast::statements::Stmt,
    check_source,
    errors::errors::{ErrorImpl, Phase},
    render_error,
};

#[test]
fn test_check_complete_program() {
    let source = r#"
'''
Punto en el plano y operaciones sobre vectores
'''
type Punto : { float x float y }

def float norma2 ( Punto p ) : {
    return p.x * p.x + p.y * p.y
}

def int suma ( int[3] v ) : {
    int i = 0
    int total = 0
    while i < 3 : {
        total = total + v[i]
        i = i + 1
    }
    return total
}

Punto origen
origen.x = 0
origen.y = 0.5
float n = norma2(origen)
int[3] datos
datos[0] = 'a'      # char widens to int
int s = suma(datos)
bool lejos = n > 1.0 or not (s <= 0x10)
"#;

    let program = check_source(source, "main.vip").unwrap();

    assert_eq!(program.len(), 11);
    assert!(matches!(program.body[0], Stmt::TypeDef { .. }));
    assert!(matches!(program.body[3], Stmt::Instance { .. }));
}

#[test]
fn test_semicolon_separated_parameters() {
    let source = "def int add ( int ; a ; int ; b ) : { return a + b ; }\nint r = add(2, 3);";

    assert!(check_source(source, "add.vip").is_ok());
}

#[test]
fn test_lexical_error_stops_pipeline() {
    let errors = check_source("int a = 1\nint b = a $ 2\n", "lex.vip").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].phase(), Phase::Lexical);
    assert_eq!(errors[0].get_line(), 2);
}

#[test]
fn test_syntax_error_stops_pipeline() {
    // The undeclared name on line 1 is never reported: parsing fails first
    let errors = check_source("x = 1\nint a = 1 <\n", "syntax.vip").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].phase(), Phase::Syntax);
}

#[test]
fn test_semantic_errors_are_collected_in_order() {
    let source = "\
def int f(int a; float b): { return a }
int x = f(1, 2)
return 5
bool b = 1
";

    let errors = check_source(source, "sem.vip").unwrap_err();
    let summary: Vec<(&str, u32)> = errors.iter().map(|error| (error.get_error_name(), error.get_line())).collect();

    assert_eq!(
        summary,
        vec![("ParamTypeMismatch", 2), ("ReturnOutsideFunction", 3), ("TypeError", 4)]
    );
    assert!(errors.iter().all(|error| error.phase() == Phase::Semantic));
    assert_eq!(
        *errors[0].get_internal(),
        ErrorImpl::ParamTypeMismatch {
            function: "f".to_string(),
            position: 2,
            expected: "float".to_string(),
            received: "int".to_string(),
        }
    );
}

#[test]
fn test_rendered_diagnostic() {
    let source = "int a = 5;\na = a + 1.5;\n";
    let errors = check_source(source, "main.vip").unwrap_err();

    assert_eq!(errors.len(), 1);
    let rendered = render_error(&errors[0], source);
    assert!(rendered.contains("TypeError (Expected type `int`, received `float`)"));
    assert!(rendered.contains("2 | a = a + 1.5;"));
    assert_eq!(
        errors[0].to_string(),
        "[semantic error] main.vip:2: types do not match: expected int, received float"
    );
}
