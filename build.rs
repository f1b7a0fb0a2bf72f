use tauri_build::{Attributes, DefaultPermissionRule, InlinedPlugin};

fn main() {
    // Inline plugins need their commands declared here so Tauri generates
    // `allow-*` permissions and a default set for capabilities/default.json
    let attributes = Attributes::new()
        .plugin(
            "file-system",
            InlinedPlugin::new()
                .commands(&["save_file"])
                .default_permission(DefaultPermissionRule::AllowAllCommands),
        )
        .plugin(
            "back-button",
            InlinedPlugin::new()
                .commands(&["exit_app"])
                .default_permission(DefaultPermissionRule::AllowAllCommands),
        );

    if let Err(e) = tauri_build::try_build(attributes) {
        eprintln!("Error: failed to run tauri build: {:#}", e);
        std::process::exit(1);
    }
}
