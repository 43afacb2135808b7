//! Reading 2DL documents.
//!
//! [`Reader`] runs the whole pipeline: parse, expand aliases and constants,
//! check the schema against the bundled meta-schema, then check the
//! document against the schema.
//!
//! ```text
//! let reader = Reader::default();
//! let tree = reader.read_with_schema(&document, &schema)?;
//! ```

mod reader;

use std::sync::Once;

pub use reader::{Origin, ReadError, ReadErrorKind, Reader, ReaderOptions, META_SCHEMA};

static TRACING_INIT: Once = Once::new();

/// Install the log subscriber.
///
/// Does nothing unless `TOODLE_LOG` or `RUST_LOG` holds a filter such as
/// `toodle_expand=trace`. With `TOODLE_LOG_TREE` set, spans are printed as
/// an indented tree. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = std::env::var("TOODLE_LOG")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
        else {
            return;
        };
        let registry = tracing_subscriber::registry().with(EnvFilter::new(directives));
        if std::env::var_os("TOODLE_LOG_TREE").is_some() {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
