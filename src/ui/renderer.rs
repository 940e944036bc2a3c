//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from the state, then
//! hand its parts to the components. Overlays are drawn last so they sit on
//! top of the list.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_list_layout(vm, theme, cols, rows);

    if let Some(form) = &vm.form {
        components::render_form(form, theme, rows, cols);
    }
    if let Some(confirm) = &vm.confirm {
        components::render_confirm(confirm, theme, rows, cols);
    }
}
