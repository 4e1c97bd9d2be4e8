#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use dirtree_csv::app;
use dirtree_csv::app::file_dialog::NativeDialogService;
use std::sync::{Arc, Mutex};
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use wry::WebViewBuilder;

const INDEX_HTML: &str = include_str!("ui/index.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let event_loop = EventLoopBuilder::<app::events::UserEvent>::with_user_event().build();

    let state = Arc::new(Mutex::new(app::state::AppState::default()));
    let (width, height, pos_x, pos_y) = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        let (width, height) = state_guard.config.window_size;
        let (pos_x, pos_y) = state_guard.config.window_position;
        (width, height, pos_x, pos_y)
    };

    let window = WindowBuilder::new()
        .with_title("Directory Tree CSV Generator")
        .with_inner_size(tao::dpi::LogicalSize::new(width, height))
        .with_position(tao::dpi::LogicalPosition::new(pos_x, pos_y))
        .with_min_inner_size(tao::dpi::LogicalSize::new(640, 480))
        .build(&event_loop)?;
    let window = Arc::new(window);

    let proxy = event_loop.create_proxy();
    let dialog_service = Arc::new(NativeDialogService);

    let ipc_handler_state = state.clone();
    let ipc_handler_proxy = proxy.clone();
    let ipc_handler = move |message: String| {
        app::handle_ipc_message(
            message,
            dialog_service.clone(),
            ipc_handler_proxy.clone(),
            ipc_handler_state.clone(),
        );
    };

    let drop_handler_state = state.clone();
    let drop_handler_proxy = proxy.clone();
    let file_drop_handler = move |event| {
        use app::events::UserEvent;
        use wry::FileDropEvent;
        match event {
            FileDropEvent::Hovered { .. } => {
                let _ = drop_handler_proxy.send_event(UserEvent::DragStateChanged(true));
            }
            FileDropEvent::Dropped { paths, .. } => {
                let _ = drop_handler_proxy.send_event(UserEvent::DragStateChanged(false));
                if let Some(path) = paths.first() {
                    app::tasks::start_build_on_path(
                        path.clone(),
                        drop_handler_proxy.clone(),
                        drop_handler_state.clone(),
                    );
                }
            }
            FileDropEvent::Cancelled => {
                let _ = drop_handler_proxy.send_event(UserEvent::DragStateChanged(false));
            }
            _ => (),
        }
        true
    };

    let webview = WebViewBuilder::new(&*window)
        .with_html(INDEX_HTML)
        .with_devtools(cfg!(debug_assertions))
        .with_ipc_handler(ipc_handler)
        .with_file_drop_handler(file_drop_handler)
        .build()?;

    let state_for_events = state.clone();
    let window_for_events = window.clone();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                tracing::info!("Application initialized.");
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    tracing::info!("Close requested. Saving final window state...");
                    let mut state_guard = state_for_events
                        .lock()
                        .expect("Mutex was poisoned. This should not happen.");
                    let size = window_for_events.inner_size();
                    let position = window_for_events.outer_position().unwrap_or_default();
                    state_guard.config.window_size = (size.width.into(), size.height.into());
                    state_guard.config.window_position = (position.x.into(), position.y.into());
                    state_guard.cancel_current_build();
                    state_guard.save_config();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let mut state_guard = state_for_events
                        .lock()
                        .expect("Mutex was poisoned. This should not happen.");
                    state_guard.config.window_size = (size.width.into(), size.height.into());
                }
                WindowEvent::Moved(position) => {
                    let mut state_guard = state_for_events
                        .lock()
                        .expect("Mutex was poisoned. This should not happen.");
                    state_guard.config.window_position = (position.x.into(), position.y.into());
                }
                _ => (),
            },
            Event::UserEvent(user_event) => {
                app::handle_user_event(user_event, &webview);
            }
            _ => (),
        }
    })
}
