//! Interactive command parsing.
//!
//! Each line typed at the shop prompt is split into words (double or single
//! quotes group words, so notes can contain spaces) and parsed with clap.

use clap::{Parser, Subcommand};

/// One line of shop input.
#[derive(Debug, Parser)]
#[command(
    name = "gwd",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
pub struct ShopLine {
    #[command(subcommand)]
    pub command: ShopCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShopCommand {
    /// Show the menu
    Menu,
    /// Add a menu item to the cart
    Add {
        /// Menu item slug (see `menu`)
        slug: String,

        /// Number of units
        #[arg(short, long)]
        quantity: Option<u32>,

        /// Spice level (mild, medium, hot, extra-hot)
        #[arg(short, long)]
        spice: Option<String>,

        /// Notes for the kitchen
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Start configuring an item before adding it
    Pick {
        /// Menu item slug
        slug: String,
    },
    /// Add one unit to the item being configured
    #[command(alias = "more")]
    Inc,
    /// Remove one unit from the item being configured
    #[command(alias = "less")]
    Dec,
    /// Add the item being configured to the cart
    Commit,
    /// Remove a line from the cart
    #[command(alias = "rm")]
    Remove {
        /// Position in the cart, starting at 1
        position: usize,
    },
    /// Choose how to pay (mpesa, bank, cash)
    Pay {
        method: String,
    },
    /// Show or hide the cart panel
    Cart,
    /// Review the order and send it on WhatsApp
    Checkout,
    /// Leave the shop
    #[command(alias = "exit")]
    Quit,
}

/// Parse one input line.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns a clap error (including `--help` output) for anything that is
/// not a valid command, or a message for unbalanced quotes.
pub fn parse_line(line: &str) -> Result<Option<ShopCommand>, ParseLineError> {
    let words = split_words(line).ok_or(ParseLineError::UnclosedQuote)?;
    if words.is_empty() {
        return Ok(None);
    }
    let parsed = ShopLine::try_parse_from(words)?;
    Ok(Some(parsed.command))
}

/// Errors parsing an input line.
#[derive(Debug, thiserror::Error)]
pub enum ParseLineError {
    #[error("unclosed quote")]
    UnclosedQuote,

    #[error(transparent)]
    Clap(#[from] clap::Error),
}

/// Split a line into words, honouring single and double quotes.
///
/// A backslash outside single quotes takes the next character literally.
/// Returns `None` if a quote is left open.
fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if c == '\\' && quote != Some('\'') {
            current.push(chars.next().unwrap_or('\\'));
            in_word = true;
            continue;
        }
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return None;
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words(r#"add beef-samosa --notes "no onions" -q 3"#).unwrap(),
            ["add", "beef-samosa", "--notes", "no onions", "-q", "3"]
        );
        assert_eq!(split_words("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_words("pay ''").unwrap(), ["pay", ""]);
        assert!(split_words("add 'oops").is_none());
    }

    #[test]
    fn test_split_words_escapes() {
        assert_eq!(
            split_words(r#"add mandazi --notes no\ sugar"#).unwrap(),
            ["add", "mandazi", "--notes", "no sugar"]
        );
        assert_eq!(
            split_words(r#"add x --notes "say \"hi\"""#).unwrap(),
            ["add", "x", "--notes", r#"say "hi""#]
        );
        assert_eq!(split_words(r"it\'s 'a\b'").unwrap(), ["it's", r"a\b"]);
        assert_eq!(split_words(r"end\").unwrap(), [r"end\"]);
    }

    #[test]
    fn test_parse_add() {
        let command = parse_line(r#"add beef-samosa -q 3 --spice hot --notes "no onions""#)
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            ShopCommand::Add {
                slug: "beef-samosa".to_string(),
                quantity: Some(3),
                spice: Some("hot".to_string()),
                notes: Some("no onions".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse_line("rm 2").unwrap(), Some(ShopCommand::Remove { position: 2 }));
        assert_eq!(parse_line("more").unwrap(), Some(ShopCommand::Inc));
        assert_eq!(parse_line("exit").unwrap(), Some(ShopCommand::Quit));
    }

    #[test]
    fn test_blank_line() {
        assert!(parse_line("").unwrap().is_none());
    }

    #[test]
    fn test_invalid_lines() {
        assert!(parse_line("dance").is_err());
        assert!(parse_line("remove two").is_err());
        assert!(matches!(
            parse_line("add \"samosa"),
            Err(ParseLineError::UnclosedQuote)
        ));
    }
}
