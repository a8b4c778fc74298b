use dioxus::prelude::*;
use datagrid::ui::app::App;

fn main() {
    datagrid::logging::init();
    tracing::info!("datagrid started");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new()
                    .with_title("DataGrid")
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 800.0)),
            ),
        )
        .launch(App);
}
