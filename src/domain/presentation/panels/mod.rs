mod diagnostics_panel;
mod help_panel;
mod settings_panel;

pub use diagnostics_panel::show_diagnostics_panel;
pub use help_panel::show_help_panel;
pub use settings_panel::show_settings_panel;
