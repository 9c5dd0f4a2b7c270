//! varstore CLI Client
//!
//! Command-line interface for interacting with a varstore server.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;

use clap::{Parser, Subcommand};

use varstore::protocol::{read_reply, write_request, Request, Status};

/// varstore CLI
#[derive(Parser, Debug)]
#[command(name = "varstore-cli")]
#[command(about = "CLI for the varstore variable store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:4117")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set a variable to a value
    Set {
        /// The variable name
        name: String,

        /// The value to set
        value: String,
    },

    /// Get a variable's current value
    Get {
        /// The variable name
        name: String,
    },

    /// Remove a variable
    Unset {
        /// The variable name
        name: String,
    },

    /// How many variables currently hold a value
    Numequalto {
        /// The value to count
        value: String,
    },

    /// Reverse the last mutation
    Undo,

    /// Re-apply the last undone mutation
    Redo,

    /// Clear all variables, counts, and history
    Reset,

    /// Ping the server
    Ping,
}

fn main() {
    let args = Args::parse();

    let request = match args.command {
        Commands::Set { name, value } => Request::Set { name, value },
        Commands::Get { name } => Request::Get { name },
        Commands::Unset { name } => Request::Unset { name },
        Commands::Numequalto { value } => Request::NumEqualTo { value },
        Commands::Undo => Request::Undo,
        Commands::Redo => Request::Redo,
        Commands::Reset => Request::Reset,
        Commands::Ping => Request::Ping,
    };

    let stream = match TcpStream::connect(&args.server) {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("error: failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    let mut writer = BufWriter::new(match stream.try_clone() {
        Ok(clone) => clone,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    });
    let mut reader = BufReader::new(stream);

    if let Err(e) = write_request(&mut writer, &request) {
        eprintln!("error: failed to send request: {}", e);
        std::process::exit(1);
    }

    match read_reply(&mut reader) {
        Ok(reply) => match reply.status {
            Status::Ok => println!("{}", reply.text),
            Status::Error => {
                eprintln!("error: {}", reply.text);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("error: failed to read reply: {}", e);
            std::process::exit(1);
        }
    }
}
