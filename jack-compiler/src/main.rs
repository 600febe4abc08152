use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use jack_compiler::compile_source;
use jack_compiler::error::CompileError;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <input.jack | directory>", args[0]);
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1]) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(input: &str) -> Result<(), CompileError> {
    let path = Path::new(input);
    let jack_files: Vec<PathBuf> = if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)
            .map_err(|e| io_err(input, e))?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("jack"))
            .collect();
        files.sort();
        files
    } else {
        vec![path.to_path_buf()]
    };

    for jack_file in &jack_files {
        compile_file(jack_file)?;
    }

    println!("Compilation complete: {} file(s)", jack_files.len());
    Ok(())
}

fn compile_file(jack_file: &Path) -> Result<(), CompileError> {
    let file_str = jack_file.to_string_lossy().into_owned();
    let source = fs::read_to_string(jack_file).map_err(|e| io_err(&file_str, e))?;
    let output_path = jack_file.with_extension("vm");

    let out = File::create(&output_path).map_err(|e| io_err(&file_str, e))?;
    compile_source(&file_str, &source, BufWriter::with_capacity(8192, out))?;

    println!("{} -> {}", file_str, output_path.display());
    Ok(())
}

fn io_err(file: &str, e: std::io::Error) -> CompileError {
    CompileError::new(file, None, jack_compiler::error::CompileErrorKind::Io(e))
}
