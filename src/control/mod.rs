//! Control surface for a running crawl service
//!
//! The server exposes the orchestrator's Start/Stop/List operations over HTTP;
//! the client is what the command-line subcommands use to call it.
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | Start | `POST /start` `{"root": ...}` | `{"message": ...}` |
//! | Stop | `POST /stop` `{"root": ...}` | `{"message": ...}` |
//! | List | `GET /list?root=*` | newline-delimited `{"message": ...}` |

mod client;
mod messages;
mod server;

pub use client::ControlClient;
pub use messages::{CrawlRequest, ListQuery};
pub use server::{router, serve, serve_with_shutdown};
