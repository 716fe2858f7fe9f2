//! Pin-or-defer plugin selection.
//!
//! A pinned name narrows a group to exactly one plugin. Without a pin the
//! whole candidate sequence is passed on, because generator/provider
//! compatibility is a pairwise property the solver can only decide with both
//! sets in hand.

use crate::core::PluginGroup;
use crate::plugin::PluginDescriptor;
use crate::resolver::errors::ResolveError;

/// Select candidates for one group.
///
/// With `pinned`, returns a singleton holding the first candidate (in
/// discovery order) whose name matches exactly, or
/// [`ResolveError::PluginNotFound`]. Without `pinned`, returns `candidates`
/// unchanged.
pub fn select(
    group: PluginGroup,
    candidates: Vec<PluginDescriptor>,
    pinned: Option<&str>,
) -> Result<Vec<PluginDescriptor>, ResolveError> {
    let Some(name) = pinned else {
        tracing::debug!(
            "No {} pinned, deferring selection across {} candidates",
            group,
            candidates.len()
        );
        return Ok(candidates);
    };

    let available: Vec<String> = candidates.iter().map(|c| c.name().to_string()).collect();

    match candidates.into_iter().find(|c| c.name() == name) {
        Some(found) => {
            tracing::debug!("Using pinned {} `{}`", group, name);
            Ok(vec![found])
        }
        None => Err(ResolveError::PluginNotFound {
            group,
            name: name.to_string(),
            available,
        }),
    }
}
