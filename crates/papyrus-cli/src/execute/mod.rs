mod config;
mod fmt;

use crate::args::{Colors, PapyrusArgs, RootCommand};
use crate::Papyrus;

impl Papyrus {
    pub fn execute(&mut self, args: PapyrusArgs) -> Result<(), anyhow::Error> {
        self.colors = match args.colors {
            Colors::Auto => atty_stderr(),
            Colors::Always => true,
            Colors::Never => false,
        };

        match args.cmd {
            RootCommand::Format(cmd) => self.execute_format(cmd),
            RootCommand::Config { cmd } => self.execute_config(cmd),
            RootCommand::Version => {
                println!("papyrus {}", clap::crate_version!());
                Ok(())
            }
        }
    }
}

fn atty_stderr() -> bool {
    atty::is(atty::Stream::Stderr)
}
