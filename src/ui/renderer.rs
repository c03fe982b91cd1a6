//! Top-level rendering coordinator.
//!
//! Rendering is two steps: [`AppState::compute_viewmodel`] turns state into
//! a [`UIViewModel`](crate::ui::UIViewModel), then the components print it.
//! Nothing here clears the screen; Zellij hands the plugin a fresh frame on
//! every render.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI for a pane of `rows` x `cols` to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_layout(&viewmodel, &state.theme, rows, cols);
}
