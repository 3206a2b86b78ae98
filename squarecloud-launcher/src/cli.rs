use clap::Parser;
use std::ffi::OsString;

/// The launcher has no options of its own: everything after the program name
/// belongs to the installed binary, except a leading `update`.
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "squarecloud",
    about = "Square Cloud CLI launcher",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// `update`, or arguments forwarded verbatim to the installed binary
    #[clap(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}

/// What the launcher was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Fetch and install the latest binary
    Update,
    /// Run the installed binary with these arguments
    Forward(Vec<OsString>),
}

/// First argument that triggers acquisition instead of forwarding
pub const UPDATE_COMMAND: &str = "update";

impl Args {
    /// Parse the process arguments
    pub fn from_env() -> Self {
        Self::from_argv(std::env::args_os())
    }

    /// Parse a full argv, program name first.
    ///
    /// An escape is placed after the program name so clap takes every user
    /// token as a value; a user's own leading `--` is kept and forwarded.
    pub fn from_argv<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let bin_name = argv
            .next()
            .unwrap_or_else(|| OsString::from("squarecloud"));

        Self::parse_from(
            std::iter::once(bin_name)
                .chain(std::iter::once(OsString::from("--")))
                .chain(argv),
        )
    }

    pub fn mode(self) -> Mode {
        match self.args.first() {
            Some(first) if first == UPDATE_COMMAND => Mode::Update,
            _ => Mode::Forward(self.args),
        }
    }
}
