use anyhow::{Context, Result, bail};
use arboard::Clipboard;
use std::io::{BufRead, Read, Write};

/// Hidden subcommand that keeps the selection alive after `mdlink` exits.
pub const HOLD_COMMAND: &str = "hold-clipboard";

/// Line the holder prints once it owns the clipboard.
const READY: &str = "ready";

/// Copy `text` to the system clipboard.
///
/// On Linux the contents vanish with the owning process, so ownership is
/// handed to a background `mdlink hold-clipboard` that serves it until
/// something else is copied.
#[cfg(target_os = "linux")]
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    use std::io::BufReader;
    use std::process::{Command, Stdio};

    let exe = std::env::current_exe().context("Failed to locate the mdlink executable")?;
    let mut holder = Command::new(exe)
        .arg(HOLD_COMMAND)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .context("Failed to start clipboard holder")?;

    let mut stdin = holder
        .stdin
        .take()
        .context("Clipboard holder has no stdin")?;
    stdin
        .write_all(text.as_bytes())
        .context("Failed to send link to clipboard holder")?;
    drop(stdin);

    let stdout = holder
        .stdout
        .take()
        .context("Clipboard holder has no stdout")?;
    if let Err(e) = await_ready(BufReader::new(stdout)) {
        let _ = holder.wait();
        return Err(e);
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to copy to clipboard")?;
    Ok(())
}

/// Body of the hidden holder process: read the link from `input`, take the
/// clipboard, report [`READY`] on `output` and serve the selection until it
/// is replaced.
pub fn hold(mut input: impl Read, mut output: impl Write) -> Result<()> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("Failed to read link")?;

    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text.as_str())
        .context("Failed to copy to clipboard")?;
    writeln!(output, "{READY}")?;
    output.flush()?;

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        clipboard
            .set()
            .wait()
            .text(text)
            .context("Lost clipboard while holding link")?;
    }
    Ok(())
}

/// Waits for the holder to confirm it owns the clipboard.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn await_ready(mut reader: impl BufRead) -> Result<()> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to hear back from clipboard holder")?;
    if line.trim_end() != READY {
        bail!("Clipboard holder could not take the clipboard");
    }
    Ok(())
}

/// Put the link on the clipboard, printing it instead when asked to or when
/// no clipboard is available (headless sessions, CI).
pub fn deliver(link: &str, print_only: bool) {
    if print_only {
        println!("{link}");
        return;
    }

    match copy_to_clipboard(link) {
        Ok(()) => log::info!("Copied {link}"),
        Err(e) => {
            log::warn!("{e:#}; printing link instead");
            println!("{link}");
        }
    }
}
