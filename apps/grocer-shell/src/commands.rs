//! # Shell Commands
//!
//! Parses one input line into a [`Command`] and runs it against the state.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "add Bread" ──► Command::from_str ──► Command::Add("Bread")            │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                          resolve "Bread" → &Product (catalog)           │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                          session.add_to_cart(&product)                  │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                          Reply::Text("added Bread" + status)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Names are matched exactly first, then ignoring ASCII case.

use std::str::FromStr;

use grocer_core::{Catalog, CoreError, Product, SelectionMode, Session, Store};
use tracing::debug;

use crate::error::{ShellError, ShellResult};
use crate::state::ShellState;
use crate::view;

// =============================================================================
// Command
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Stores,
    Cart,
    Add(String),
    Remove(String),
    Pick(String),
    Unpick,
    Choose(String),
    Mode(SelectionMode),
    Locate(i64, i64),
    Price { store: String, product: String },
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "products" => Command::Products,
            "stores" => Command::Stores,
            "cart" => Command::Cart,
            "add" => Command::Add(argument(word, rest)?),
            "remove" => Command::Remove(argument(word, rest)?),
            "pick" => Command::Pick(argument(word, rest)?),
            "unpick" => Command::Unpick,
            "choose" => Command::Choose(argument(word, rest)?),
            "mode" => Command::Mode(
                argument(word, rest)?
                    .parse::<SelectionMode>()
                    .map_err(CoreError::from)?,
            ),
            "locate" => {
                let mut numbers = rest.split_whitespace().map(str::parse::<i64>);
                match (numbers.next(), numbers.next(), numbers.next()) {
                    (Some(Ok(x)), Some(Ok(y)), None) => Command::Locate(x, y),
                    _ => return Err(ShellError::parse("usage: locate <x> <y>")),
                }
            }
            "price" => match rest.split_once('/') {
                Some((store, product)) if !store.trim().is_empty() && !product.trim().is_empty() => {
                    Command::Price {
                        store: store.trim().to_string(),
                        product: product.trim().to_string(),
                    }
                }
                _ => return Err(ShellError::parse("usage: price <store> / <product>")),
            },
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(ShellError::parse("empty command")),
            other => {
                return Err(ShellError::parse(format!(
                    "unknown command '{}'. Type 'help' for a list",
                    other
                )))
            }
        };
        Ok(command)
    }
}

fn argument(word: &str, rest: &str) -> ShellResult<String> {
    if rest.is_empty() {
        return Err(ShellError::parse(format!("usage: {} <name>", word)));
    }
    Ok(rest.to_string())
}

/// What the read loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

// =============================================================================
// Execution
// =============================================================================

/// Runs one command. Mutations append the status when the session changed.
pub fn execute(state: &mut ShellState, command: Command) -> ShellResult<Reply> {
    debug!(?command, "Executing command");

    let text = match command {
        Command::Products => view::products(state.session.catalog(), &state.config),
        Command::Stores => view::stores(&state.session, &state.config),
        Command::Cart => view::cart(&state.session, &state.config),
        Command::Status => view::status(state.session.view(), &state.config),
        Command::Help => view::HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),

        Command::Price { store, product } => {
            let session = &state.session;
            let store = resolve_store(session, &store)?;
            let product = resolve_catalog_product(session.catalog(), &product)?;
            view::price(store, product, session.effective_price(store, product), &state.config)
        }

        Command::Add(name) => {
            let product = resolve_catalog_product(state.session.catalog(), &name)?.clone();
            state.session.add_to_cart(&product)?;
            with_status(state, format!("added {}", product.name()))
        }

        Command::Remove(name) => {
            let product = match state.session.cart().find_by_name(&name) {
                Some(product) => product.clone(),
                None => resolve_catalog_product(state.session.catalog(), &name)?.clone(),
            };
            if state.session.remove_from_cart(&product) {
                with_status(state, format!("removed {}", product.name()))
            } else {
                format!("{} is not in the cart", product.name())
            }
        }

        Command::Pick(name) => {
            let product = resolve_cart_product(&state.session, &name)?.clone();
            state.session.select_product(&product)?;
            with_status(state, format!("picked {}", product.name()))
        }

        Command::Unpick => {
            state.session.clear_selected_product();
            with_status(state, "cleared picked product".to_string())
        }

        Command::Choose(name) => {
            let store = resolve_store(&state.session, &name)?.clone();
            let mode = state.session.mode();
            state.session.select_store(&store)?;
            if mode == SelectionMode::Explicit {
                with_status(state, format!("chose {}", store.name()))
            } else {
                format!(
                    "store choice ignored in {} mode; switch with 'mode explicit'",
                    mode
                )
            }
        }

        Command::Mode(mode) => {
            state.session.set_mode(mode);
            with_status(state, format!("mode set to {}", mode))
        }

        Command::Locate(x, y) => {
            state.session.set_user_location(x, y);
            let message = format!("moved to {}", state.session.user_location());
            with_status(state, message)
        }
    };
    Ok(Reply::Text(text))
}

fn with_status(state: &mut ShellState, message: String) -> String {
    if !state.take_change() {
        return message;
    }
    format!(
        "{}\n{}",
        message,
        view::status(state.session.view(), &state.config)
    )
}

// =============================================================================
// Name Resolution
// =============================================================================

fn resolve_catalog_product<'a>(catalog: &'a Catalog, name: &str) -> ShellResult<&'a Product> {
    catalog
        .find_by_name(name)
        .or_else(|| catalog.iter().find(|p| p.name().eq_ignore_ascii_case(name)))
        .ok_or_else(|| CoreError::ProductNotFound(name.to_string()).into())
}

fn resolve_cart_product<'a>(session: &'a Session, name: &str) -> ShellResult<&'a Product> {
    let cart = session.cart();
    cart.find_by_name(name)
        .or_else(|| cart.iter().find(|p| p.name().eq_ignore_ascii_case(name)))
        .ok_or_else(|| CoreError::ProductNotInCart(name.to_string()).into())
}

fn resolve_store<'a>(session: &'a Session, name: &str) -> ShellResult<&'a Store> {
    session
        .store_by_name(name)
        .or_else(|| {
            session
                .stores()
                .iter()
                .find(|s| s.name().eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| CoreError::StoreNotFound(name.to_string()).into())
}
