//! # Error Suggestions
//!
//! Turns library errors into user-facing messages that say what went wrong
//! AND how to fix it. Errors without a known remedy pass through unchanged.
//!
//! ```rust,ignore
//! let relocations = plan_relocations(&store, &range, &settings)
//!     .map_err(suggestions::explain)?;
//! ```

use crate::error::Error;

/// Attach hints to `error` where a common remedy exists.
pub fn explain(error: Error) -> anyhow::Error {
    let hints: &[&str] = match &error {
        Error::Usage { .. } => &[
            "hint: Pass the range as one argument: source-relocate <commit1>..<commit2>",
            "hint: Or pass the two commits separately: source-relocate <commit1> <commit2>",
        ],
        Error::GitCommand { .. } => &[
            "hint: Run inside the project repository or point at it with -C <DIR>",
            "hint: Check that both commits exist, e.g. with 'git rev-parse <commit>'",
        ],
        Error::NoOwningProject { .. } => &[
            "hint: Every element must live below a directory containing project.conf",
        ],
        Error::UserConfig { .. } => &[
            "hint: Fix the file, point elsewhere with --config <FILE>, or bypass it with --cache-root <DIR>",
        ],
        _ => &[],
    };

    if hints.is_empty() {
        return anyhow::Error::new(error);
    }

    anyhow::anyhow!("{error}\n\n{}", hints.join("\n"))
}
