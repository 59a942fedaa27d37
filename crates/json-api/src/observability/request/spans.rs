//! Route labels for spans and metrics.

use uuid::Uuid;

/// Collapse identifier segments so every order shares one label.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_ids_are_collapsed() {
        let path = format!("/api/orders/{}/cancel", Uuid::now_v7());

        assert_eq!(route_label(&path), "/api/orders/{id}/cancel");
    }

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/api/admin/orders"), "/api/admin/orders");
    }
}
