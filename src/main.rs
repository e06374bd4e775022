extern crate itgl;

use clap::{App, Arg};

use std::fs::File;
use std::io::Read;

use log::{error, info};

use itgl::syntax::*;
use itgl::*;

fn main() {
    let config = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file (defaults to '-', meaning STDIN)")
                .default_value("-")
                .index(1),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .arg(Arg::with_name("BIND")
                 .help("Adds NAME:TYPE to the initial typing environment, e.g., `--bind 'f:int -> ?'`; may be repeated, later bindings shadow earlier ones")
                 .long("bind")
                 .short("b")
                 .multiple(true)
                 .number_of_values(1))
        .arg(Arg::with_name("SHOW_CONSTRAINTS")
                 .help("When set, prints the generated constraints and the solved substitution before the principal type")
                 .long("constraints"))
        .arg(Arg::with_name("WIDTH")
                 .help("Sets the width used for printing types and constraints")
                 .long("width")
                 .short("w")
                 .number_of_values(1))
        .get_matches();

    let verbosity = match config.occurrences_of("v") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3 | _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter(None, verbosity)
        .init();

    let mut options = Options::default();

    options.show_constraints = config.is_present("SHOW_CONSTRAINTS");

    if let Some(width) = config.value_of("WIDTH") {
        options.width = width.parse().unwrap_or_else(|e| {
            error!("Invalid width '{}': {}", width, e);
            std::process::exit(2);
        });
    }

    for binding in config.values_of("BIND").into_iter().flatten() {
        let (x, t) = Options::parse_binding(binding).unwrap_or_else(|e| {
            error!("Invalid binding: {}", e);
            std::process::exit(2);
        });
        info!("Binding {} : {}", x, t);
        options.bind(x, t);
    }

    let input_source = config.value_of("INPUT").expect("input source");

    let mut input = String::new();
    let res = if input_source == "-" {
        std::io::stdin().read_to_string(&mut input)
    } else {
        File::open(input_source).and_then(|mut f| f.read_to_string(&mut input))
    };

    if let Err(err) = res {
        error!("I/O error: {}", err);
        std::process::exit(47);
    }

    let e = Expr::parse(&input).unwrap_or_else(|e| {
        error!("Parse error:\n{}", e);
        std::process::exit(2);
    });

    let t = principal_type(&options, &e).unwrap_or_else(|err| {
        error!("Type error: {}", err);
        std::process::exit(1);
    });

    println!("{}", t.display(options.width));

    std::process::exit(0);
}

fn principal_type(options: &Options, e: &Expr) -> Result<Type, TypeError> {
    let ctx = options.ctx();

    if !options.show_constraints {
        return TypeInference::infer(&ctx, e);
    }

    let mut ti = TypeInference::new();

    let (t, cs) = ti.generate(&ctx, e)?;
    println!("constraints: {}", cs);

    let (t, theta) = ti.solve(t, cs)?;
    println!("substitution: {}", theta);

    Ok(ti.generalize(t))
}

#[cfg(test)]
mod test {
    extern crate assert_cli;

    use assert_cli::Assert;
    use std::io::Write;

    fn run<F>(args: Vec<&str>, s: &str, f: F)
    where
        F: Fn(Assert) -> (),
    {
        let mut args = args;

        // no args
        eprintln!("arg-free");
        f(Assert::main_binary().with_args(&args).stdin(s));

        // explicit stdin
        eprintln!("explicit stdin");
        args.push("-");
        f(Assert::main_binary().with_args(&args).stdin(s));

        // file
        args.pop();
        let mut file = tempfile::NamedTempFile::new().expect("make temporary file");
        file.write_all(s.as_bytes())
            .expect("couldn't write to temporary file");
        let file_name = file.path().to_str().unwrap();
        eprintln!("temporary file {}", file_name);

        args.push(file_name);

        f(Assert::main_binary().with_args(&args));
    }

    fn succeeds_with(args: Vec<&str>, s: &str, out: &str) {
        run(args, s, |a| {
            a.succeeds().and().stdout().contains(out).unwrap()
        });
    }

    fn fails(args: Vec<&str>, s: &str) {
        run(args, s, |a| a.fails().unwrap());
    }

    #[test]
    fn id() {
        succeeds_with(vec![], "\\x. x", "'a -> 'a");
    }

    #[test]
    fn dyn_plus() {
        succeeds_with(vec![], "\\x:?. x + 1", "? -> int");
    }

    #[test]
    fn app_id() {
        succeeds_with(vec![], "(\\x. x) 5", "int");
    }

    #[test]
    fn parse_error() {
        fails(vec![], "\\x.");
        fails(vec![], "1 +");
    }

    #[test]
    fn type_error() {
        fails(vec![], "true true");
        fails(vec![], "\\x:bool. x + 1");
        fails(vec![], "\\x. x x");
        fails(vec![], "y");
    }

    #[test]
    fn bindings() {
        succeeds_with(vec!["--bind", "f:int -> bool"], "f 1", "bool");
        succeeds_with(vec!["-b", "n:int", "-b", "n:?"], "\\x. n x", "'a -> ?");
        fails(vec!["--bind", "f:int -> bool"], "f true");
    }

    #[test]
    fn bad_binding() {
        fails(vec!["--bind", "f"], "1");
        fails(vec!["--bind", "f:string"], "1");
    }

    #[test]
    fn show_constraints() {
        succeeds_with(vec!["--constraints"], "\\x:?. x + 1", "? ~ int");
        succeeds_with(vec!["--constraints"], "(\\x. x) 5", "substitution: {x0↦int}");
        succeeds_with(vec!["--constraints"], "(\\x. x) 5", "int");
    }

    #[test]
    fn width() {
        succeeds_with(vec!["--width", "100"], "\\x. \\y. x", "'a -> 'b -> 'a");
        fails(vec!["--width", "wide"], "1");
    }
}
