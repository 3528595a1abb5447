use crate::core::models::Goal;
use crate::core::session::SessionState;
use crate::prompt::{render_goal_preview, sanitize_client_name};

#[derive(Debug, Clone, Default)]
pub struct PreviewInput {
    pub client_name: String,
    pub goal: Goal,
}

/// Flips the session's preview flag and returns the example to show, if any.
///
/// Never calls the completion service.
pub fn handle_toggle_preview(session: &mut SessionState, input: PreviewInput) -> Option<String> {
    session.client_name = sanitize_client_name(&input.client_name);
    session.goal = input.goal;
    session.preview_visible = !session.preview_visible;
    current_preview(session)
}

/// The example the page should show for this session right now.
#[must_use]
pub fn current_preview(session: &SessionState) -> Option<String> {
    session
        .preview_visible
        .then(|| render_goal_preview(session.goal, &session.client_name))
}
