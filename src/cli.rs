//! Command line of the `rendju-bot` binary: a single `-p<port>` argument.

use anyhow::{bail, Context};

/// Printed on stderr when the argument is missing.
pub const USAGE: &str = "Usage: rendju-bot -p<port>";

/// Lowest port accepted, below are the privileged ports.
pub const MIN_PORT: u16 = 1024;

/// Extracts the listening port from the process arguments (binary name excluded).
///
/// # Errors
/// When the argument is missing, does not start with `-p`, is not an integer, or is outside
/// `[1024, 65535]`.
pub fn parse_port<I, S>(args: I) -> anyhow::Result<u16>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let Some(arg) = args.next() else {
        bail!("{USAGE}");
    };
    let arg = arg.as_ref();

    let Some(port) = arg.strip_prefix("-p").filter(|port| !port.is_empty()) else {
        bail!("Invalid port argument '{arg}'\n{USAGE}");
    };
    let port: i64 = port
        .parse()
        .with_context(|| format!("Invalid port number '{port}'"))?;
    match u16::try_from(port) {
        Ok(port) if port >= MIN_PORT => Ok(port),
        _ => bail!("Port {port} out of range [{MIN_PORT}, {}]", u16::MAX),
    }
}
