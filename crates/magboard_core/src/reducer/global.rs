//! Global-config slice.

use crate::model::config::GlobalConfig;

pub type GlobalConfigState = GlobalConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigAction {
    SetDefaultTheme { theme: String },
}

pub fn reduce(state: &mut GlobalConfigState, action: GlobalConfigAction) {
    match action {
        GlobalConfigAction::SetDefaultTheme { theme } => {
            state.default_theme = theme;
        }
    }
}
