//! Unit tests for the L2 domains controller

#[cfg(test)]
mod tests {
    use crate::controllers::l2domains::{L2Domain, L2DomainDto, L2DomainsController};
    use crate::mock::MockTransport;
    use proptest::prelude::*;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn controller(mock: &MockTransport) -> L2DomainsController {
        L2DomainsController::new(Arc::new(mock.clone()))
    }

    proptest! {
        #[test]
        fn test_l2_domain_wire_bijection(
            id in 0i64..100_000,
            name in "[A-Za-z0-9 ]{0,16}",
            description in ".{0,32}",
            sections in "([0-9]{1,3};){0,3}",
        ) {
            let domain = L2Domain { id, name, description, sections };
            prop_assert_eq!(L2Domain::from(L2DomainDto::from(&domain)), domain.clone());

            let wire = serde_json::to_value(L2DomainDto::from(&domain)).unwrap();
            let decoded: L2DomainDto = serde_json::from_value(wire).unwrap();
            prop_assert_eq!(L2Domain::from(decoded), domain);
        }
    }

    #[tokio::test]
    async fn test_list_l2_domains_preserves_order() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_data(
            Method::GET,
            "/l2domains/",
            json!([
                {"id": "1", "name": "default", "description": "Default L2 domain", "sections": null},
                {"id": "3", "name": "dc-west", "sections": "1;2"}
            ]),
        );

        let domains = controller(&mock).list_l2_domains().await.unwrap();
        let names: Vec<&str> = domains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["default", "dc-west"]);
        assert_eq!(domains[0].sections, "");
        assert_eq!(domains[1].sections, "1;2");
    }

    #[tokio::test]
    async fn test_get_l2_domains_by_name_encodes_filter() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_data(
            Method::GET,
            "/l2domains/?filter_by=name&filter_value=dc%20west",
            json!([{"id": "3", "name": "dc west"}]),
        );

        let domains = controller(&mock).get_l2_domains_by_name("dc west").await.unwrap();
        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].id, 3);
    }

    #[tokio::test]
    async fn test_get_vlans_in_l2_domain() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_data(
            Method::GET,
            "/l2domains/3/vlans/",
            json!([{"id": "7", "domainId": "3", "name": "servers", "number": "100"}]),
        );

        let vlans = controller(&mock).get_vlans_in_l2_domain(3).await.unwrap();
        assert_eq!(vlans[0].number, 100);
        assert_eq!(vlans[0].domain_id, 3);
    }

    #[tokio::test]
    async fn test_update_and_delete_l2_domain() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_message(Method::PATCH, "/l2domains/", "L2 domain updated");
        mock.respond_message(Method::DELETE, "/l2domains/3/", "L2 domain deleted");
        let domains = controller(&mock);

        let domain = L2Domain {
            id: 3,
            description: "west".to_string(),
            ..Default::default()
        };
        domains.update_l2_domain(&domain).await.unwrap();
        domains.delete_l2_domain(3).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, Some(json!({"id": "3", "description": "west"})));
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].path, "/l2domains/3/");
    }
}
