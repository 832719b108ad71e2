//! Backend client context and hook for the UI.

use api::BackendClient;
use dioxus::prelude::*;
use mood::ClientConfig;

/// Get the backend client provided by [`BackendProvider`].
pub fn use_backend() -> BackendClient {
    use_context::<BackendClient>()
}

/// Provider component that makes the backend client available to every screen.
/// Wrap your app with this component.
#[component]
pub fn BackendProvider(config: ClientConfig, children: Element) -> Element {
    use_context_provider(|| {
        tracing::info!(url = %config.backend.url, "using mood backend");
        BackendClient::new(config.backend.clone())
    });

    rsx! {
        {children}
    }
}
