use std::{env, fs::read_to_string, process::exit, rc::Rc, time::Instant};

use log::info;
use viper::{file_display_name, lexer::lexer::tokenize, parser::parser::parse, render_error, type_checker::type_checker::type_check};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file.vip>", args.first().map(String::as_str).unwrap_or("viper"));
        exit(2);
    }

    let file_path: &str = &args[1];
    let file = Rc::new(file_display_name(file_path));

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            exit(2);
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(&source, Rc::clone(&file)) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            exit(1);
        }
    };

    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (_, ast) = parse(tokens, Rc::clone(&file));

    info!("Parsed in {:?}", parse_start.elapsed());

    let ast = match ast {
        Ok(ast) => ast,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            exit(1);
        }
    };

    let type_check_start = Instant::now();
    let (_, errors) = type_check(&ast);

    info!("Type checked in {:?}", type_check_start.elapsed());

    if !errors.is_empty() {
        for error in &errors {
            eprint!("{}", render_error(error, &source));
        }
        eprintln!("{} errors found in {}", errors.len(), file);
        exit(1);
    }

    println!("{}: {} statements, no errors ({:?})", file, ast.len(), start.elapsed());
}
