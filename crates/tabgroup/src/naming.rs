//! Group naming with a deterministic fallback.
//!
//! The naming service is consulted for clusters of two or more items. Any
//! error, timeout, blank answer or answer longer than the configured limit
//! yields `"Cluster of N items"`. Singletons use their own title.

use std::time::Duration;
use tabgroup_core::capability::ThemeNamer;
use tracing::{debug, warn};

use crate::config::NamingConfig;

/// Label used whenever the naming service cannot help.
pub fn fallback_name(size: usize) -> String {
    format!("Cluster of {} items", size)
}

/// First `max_len` characters of a title, trailing whitespace removed.
pub fn truncate_title(title: &str, max_len: usize) -> String {
    let title = title.trim();
    match title.char_indices().nth(max_len) {
        Some((idx, _)) => title[..idx].trim_end().to_string(),
        None => title.to_string(),
    }
}

/// Name a group of `titles`, never failing.
pub async fn resolve_name(
    namer: &dyn ThemeNamer,
    titles: &[String],
    config: &NamingConfig,
) -> String {
    let size = titles.len();
    if size == 1 {
        let name = truncate_title(&titles[0], config.max_name_len);
        return if name.is_empty() { fallback_name(1) } else { name };
    }

    let sample = &titles[..size.min(config.max_titles)];
    let call = namer.name_cluster(sample);
    let answer = tokio::time::timeout(Duration::from_millis(config.timeout_ms), call).await;

    match answer {
        Ok(Ok(name)) => {
            let name = name.trim();
            if name.is_empty() {
                warn!(namer = namer.name(), size, "naming service returned an empty name");
                fallback_name(size)
            } else if name.chars().count() > config.max_name_len {
                warn!(
                    namer = namer.name(),
                    size,
                    len = name.chars().count(),
                    "naming service returned an oversized name"
                );
                fallback_name(size)
            } else {
                debug!(namer = namer.name(), %name, "group named");
                name.to_string()
            }
        }
        Ok(Err(e)) => {
            warn!(namer = namer.name(), error = %e, "naming service failed");
            fallback_name(size)
        }
        Err(_) => {
            warn!(namer = namer.name(), timeout_ms = config.timeout_ms, "naming service timed out");
            fallback_name(size)
        }
    }
}
