//! Opening WhatsApp handoff links on the host.

use std::io::Write;

use grizzly_core::{Messenger, MessagingError};
use url::Url;

/// Opens handoff links in the default browser, or prints them.
///
/// The link is always printed so the customer can open it by hand if the
/// browser does not start.
#[derive(Debug)]
pub struct BrowserMessenger<W> {
    open_browser: bool,
    out: W,
}

impl<W: Write> BrowserMessenger<W> {
    pub const fn new(open_browser: bool, out: W) -> Self {
        Self { open_browser, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Messenger for BrowserMessenger<W> {
    fn open(&mut self, url: &Url) -> Result<(), MessagingError> {
        writeln!(self.out, "📲 Send your order on WhatsApp:\n{url}")?;
        if !self.open_browser {
            tracing::debug!("Browser opening disabled, link printed only");
            return Ok(());
        }
        webbrowser::open(url.as_str())?;
        tracing::debug!("Opened WhatsApp link in browser");
        Ok(())
    }
}
