use std::{path::PathBuf, process::exit};

use clap::Parser;
use libemulator::{
    execute::{ExecuteErr, ExecuteOk},
    Emulator,
};
use log::debug;

mod loader;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the program image to execute.
    program_path: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = try_main(Args::parse()) {
        eprintln!("{:#}", e);
        exit(1);
    }
}

fn try_main(args: Args) -> anyhow::Result<()> {
    let program = loader::load_program(&args.program_path)?;
    debug!("loaded {} byte program", program.len());

    let mut emulator = Emulator::new(program)?;
    run(&mut emulator)?;

    Ok(())
}

fn run(emulator: &mut Emulator) -> Result<(), ExecuteErr> {
    loop {
        let result = emulator.execute_instruction();

        // Drained before the fault check so output emitted by the cycle
        // still reaches stdout.
        for value in emulator.drain_output() {
            println!("{}", value);
        }

        match result? {
            ExecuteOk::Normal => {}
            ExecuteOk::Halted => {
                debug!("halted at pc {:#04x}", emulator.pc);
                return Ok(());
            }
        }
    }
}
