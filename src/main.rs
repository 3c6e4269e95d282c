use std::{env, fs::read_to_string, path::PathBuf, process, rc::Rc, time::Instant};

use rillc::{
    display_error, lexer::lexer::tokenize, parser::parser::parse, resolver::resolver::resolve,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: rillc <file.rill>");
        process::exit(2);
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains('/') {
        file_path.split('/').last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let file_contents = match read_to_string(file_path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            process::exit(2);
        }
    };

    let tokens = match tokenize(file_contents, Some(String::from(file_name))) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, PathBuf::from(file_path));
            process::exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let program = match parse(tokens, Rc::new(String::from(file_name))) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, PathBuf::from(file_path));
            process::exit(1);
        }
    };

    println!("Parsed in {:?}", parse_start.elapsed());

    let resolve_start = Instant::now();
    let validated = match resolve(&program) {
        Ok(validated) => validated,
        Err(errors) => {
            for error in errors.iter() {
                display_error(error, PathBuf::from(file_path));
            }
            process::exit(1);
        }
    };

    println!("Resolved in {:?}", resolve_start.elapsed());
    println!(
        "{}: {} consts, {} globals, {} structs, {} functions ({:?} total)",
        file_name,
        validated.consts.len(),
        validated.globals.len(),
        validated.structs.len(),
        validated.functions.len(),
        start.elapsed()
    );
}
