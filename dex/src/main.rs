#[macro_use]
extern crate clap;

use clap::{Arg, ArgGroup};
use dex::Options;

fn main() -> Result<(), dex::Error> {
    env_logger::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("Sets the program file to use")
                .index(1),
        )
        .arg(
            Arg::with_name("assembly")
                .short("a")
                .long("assembly")
                .takes_value(true)
                .value_name("ASSEMBLY")
                .help("Sets the assembly file to use"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .takes_value(true)
                .value_name("STEPS")
                .help("Stops after this many dispatch iterations"),
        )
        .arg(
            Arg::with_name("lenient")
                .short("l")
                .long("lenient")
                .help("Uses the permissive legacy semantics"),
        )
        .group(
            ArgGroup::with_name("input")
                .args(&["PROGRAM", "assembly"])
                .required(true),
        )
        .get_matches();

    let max_steps = if matches.is_present("steps") {
        Some(value_t!(matches.value_of("steps"), u64).unwrap_or_else(|err| err.exit()))
    } else {
        None
    };

    let options = Options {
        lenient: matches.is_present("lenient"),
        max_steps,
    };

    let (_vm, exit_code) = match matches.value_of("PROGRAM") {
        Some(program) => dex::run_file(program, options),

        None => {
            let asm = matches.value_of("assembly").unwrap();
            dex::run_source_file(asm, options)
        }
    }?;

    println!("Exit code: {:?}", exit_code);

    Ok(())
}
