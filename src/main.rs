use anyhow::Result;
use clap::Parser as ClapParser;
use plume_lang::config::{RuntimeConfig, DEFAULT_MAX_CALL_DEPTH};
use plume_lang::interpreter::Interpreter;
use plume_lang::keywords::load_keywords;
use plume_lang::lexer::token::TokenKind;
use plume_lang::lexer::Lexer;
use plume_lang::parser::Parser;
use rustyline::DefaultEditor;
use std::collections::HashMap;
use std::fs;
use std::process;

#[derive(ClapParser)]
#[command(name = "plume")]
#[command(about = "The Plume programming language")]
struct Cli {
    /// Script file to run (omit for REPL)
    script: Option<String>,

    /// Path to keywords JSON file
    #[arg(short, long)]
    keywords: Option<String>,

    /// Maximum interpreter call depth
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,
}

const PROMPT: &str = ">> ";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let keywords = load_keywords(cli.keywords.as_deref())?;
    let config = RuntimeConfig {
        max_call_depth: cli.max_call_depth,
    };
    let mut interpreter = Interpreter::new(config);

    match cli.script {
        None => run_prompt(&keywords, &mut interpreter)?,
        Some(path) => run_file(&path, &keywords, &mut interpreter)?,
    }

    Ok(())
}

fn run_prompt(
    keywords: &HashMap<String, TokenKind>,
    interpreter: &mut Interpreter,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let history_path = dirs::home_dir().map(|p| p.join(".plume_history"));
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                let program = match parse(&line, keywords) {
                    Ok(program) => program,
                    Err(errors) => {
                        println!("Looks like your plume got ruffled!");
                        println!(" parser errors:");
                        for error in errors {
                            println!("\t{}", error);
                        }
                        continue;
                    }
                };

                match interpreter.interpret(&program) {
                    Ok(Some(value)) => println!("{}", value),
                    Ok(None) => {}
                    Err(e) => println!("{}", e),
                }
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

fn run_file(
    path: &str,
    keywords: &HashMap<String, TokenKind>,
    interpreter: &mut Interpreter,
) -> Result<()> {
    let contents = fs::read_to_string(path)?;

    let program = match parse(&contents, keywords) {
        Ok(program) => program,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            process::exit(1);
        }
    };

    if let Err(e) = interpreter.interpret(&program) {
        eprintln!("{}", e);
        process::exit(1);
    }

    Ok(())
}

fn parse(
    source: &str,
    keywords: &HashMap<String, TokenKind>,
) -> Result<plume_lang::parser::ast::Program, Vec<plume_lang::parser::ParseError>> {
    let lexer = Lexer::with_keywords(source, keywords.clone());
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    if parser.errors().is_empty() {
        Ok(program)
    } else {
        Err(parser.errors().to_vec())
    }
}
