use http::Method;
use http::header::HeaderName;
use linguavoice_config::{AnyOrList, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    layer = match &config.origins {
        AnyOrList::Any => layer.allow_origin(AllowOrigin::any()),
        AnyOrList::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    layer = match &config.methods {
        AnyOrList::Any => layer.allow_methods(AllowMethods::any()),
        AnyOrList::List(methods) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            layer.allow_methods(methods)
        }
    };

    layer = match &config.headers {
        AnyOrList::Any => layer.allow_headers(AllowHeaders::any()),
        AnyOrList::List(headers) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            layer.allow_headers(headers)
        }
    };

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}
