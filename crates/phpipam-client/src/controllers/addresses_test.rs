//! Unit tests for the addresses controller

#[cfg(test)]
mod tests {
    use crate::controllers::addresses::{Address, AddressDto, AddressesController};
    use crate::custom_fields::CustomFields;
    use crate::mock::MockTransport;
    use crate::scalar::BoolInt;
    use crate::test_utils::arb_json_map;
    use proptest::prelude::*;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn controller(mock: &MockTransport) -> AddressesController {
        AddressesController::new(Arc::new(mock.clone()))
    }

    fn arb_address() -> impl Strategy<Value = Address> {
        let identity = (
            0i64..100_000,
            0i64..1_000,
            "10\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
            any::<bool>(),
            ".{0,24}",
            "[a-z0-9.-]{0,20}",
            "(([0-9a-f]{2}:){5}[0-9a-f]{2})?",
            "[A-Za-z ]{0,12}",
            0i64..5,
        );
        let details = (
            any::<bool>(),
            0i64..10_000,
            0i64..20,
            "(Gi0/[0-9]{1,2})?",
            ".{0,24}",
            "(2024-0[1-9]-[0-2][0-9] [0-2][0-9]:[0-5][0-9]:[0-5][0-9])?",
            any::<bool>(),
            "(2024-0[1-9]-[0-2][0-9] [0-2][0-9]:[0-5][0-9]:[0-5][0-9])?",
            arb_json_map(),
        );
        (identity, details).prop_map(
            |(
                (id, subnet_id, ip_address, is_gateway, description, hostname, mac_address, owner, tag),
                (ptr_ignore, ptr_record_id, device_id, port, note, last_seen, exclude_ping, edit_date, custom_fields),
            )| Address {
                id,
                subnet_id,
                ip_address,
                is_gateway: is_gateway.into(),
                description,
                hostname,
                mac_address,
                owner,
                tag,
                ptr_ignore: ptr_ignore.into(),
                ptr_record_id,
                device_id,
                port,
                note,
                last_seen,
                exclude_ping: exclude_ping.into(),
                edit_date,
                custom_fields,
            },
        )
    }

    proptest! {
        #[test]
        fn test_address_wire_bijection(address in arb_address()) {
            prop_assert_eq!(Address::from(AddressDto::from(&address)), address.clone());

            let wire = serde_json::to_value(AddressDto::from(&address)).unwrap();
            let decoded: AddressDto = serde_json::from_value(wire).unwrap();
            prop_assert_eq!(Address::from(decoded), address);
        }
    }

    #[test]
    fn test_address_dto_wire_names() {
        let address = Address {
            subnet_id: 3,
            ip_address: "10.0.0.5".to_string(),
            is_gateway: BoolInt(true),
            mac_address: "aa:bb:cc:dd:ee:ff".to_string(),
            ptr_ignore: BoolInt(true),
            ptr_record_id: 12,
            device_id: 8,
            last_seen: "2024-01-01 00:00:00".to_string(),
            ..Default::default()
        };

        let wire = serde_json::to_value(AddressDto::from(&address)).unwrap();
        assert_eq!(
            wire,
            json!({
                "subnetId": "3",
                "ip": "10.0.0.5",
                "is_gateway": "1",
                "mac": "aa:bb:cc:dd:ee:ff",
                "PTRIgnore": "1",
                "PTR": "12",
                "deviceId": "8",
                "lastSeen": "2024-01-01 00:00:00"
            })
        );
    }

    #[tokio::test]
    async fn test_get_address_by_id_with_nested_custom_fields() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_data(
            Method::GET,
            "/addresses/11/",
            json!({
                "id": "11", "subnetId": "3", "ip": "10.0.0.11", "is_gateway": "0",
                "hostname": "web01", "owner": null, "excludePing": "1", "note": "spare NIC",
                "custom_fields": {"rack": "R12"}
            }),
        );

        let address = controller(&mock).get_address_by_id(11).await.unwrap();
        assert_eq!(address.subnet_id, 3);
        assert_eq!(address.hostname, "web01");
        assert_eq!(address.owner, "");
        assert_eq!(address.note, "spare NIC");
        assert!(address.exclude_ping.0);
        let custom = address.custom_fields.unwrap();
        assert_eq!(custom["rack"], json!("R12"));
    }

    #[tokio::test]
    async fn test_get_addresses_by_ip_searches() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_data(
            Method::GET,
            "/addresses/search/10.0.0.11/",
            json!([{"id": "11", "ip": "10.0.0.11", "subnetId": "3"}]),
        );

        let found = controller(&mock).get_addresses_by_ip("10.0.0.11").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 11);
    }

    #[tokio::test]
    async fn test_get_address_by_ip_in_subnet_path() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_data(Method::GET, "/addresses/10.0.0.11/3", json!({"id": "11", "ip": "10.0.0.11"}));

        let address = controller(&mock).get_address_by_ip_in_subnet("10.0.0.11", 3).await.unwrap();
        assert_eq!(address.ip_address, "10.0.0.11");
    }

    #[tokio::test]
    async fn test_create_first_free_address_returns_ip() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond(
            Method::POST,
            "/addresses/first_free/3/",
            crate::common::ApiResponse {
                code: 201,
                success: true,
                message: "Address created".to_string(),
                data: Some(json!("10.0.0.12")),
            },
        );

        let address = Address {
            hostname: "web02".to_string(),
            ..Default::default()
        };
        let ip = controller(&mock).create_first_free_address(3, &address).await.unwrap();

        assert_eq!(ip, "10.0.0.12");
        assert_eq!(mock.requests()[0].body, Some(json!({"hostname": "web02"})));
    }

    #[tokio::test]
    async fn test_update_address_custom_fields_skips_schema() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_message(Method::PATCH, "/addresses/", "Address updated");

        let mut fields = CustomFields::new();
        fields.insert("rack".to_string(), json!("R13"));
        controller(&mock).update_address_custom_fields(11, &fields).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(requests[0].body, Some(json!({"id": 11, "rack": "R13"})));
    }

    #[tokio::test]
    async fn test_delete_address_remove_dns_body() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_message(Method::DELETE, "/addresses/11/", "Address deleted");
        let addresses = controller(&mock);

        addresses.delete_address(11, BoolInt(true)).await.unwrap();
        addresses.delete_address(11, BoolInt(false)).await.unwrap();

        let requests = mock.requests_with_method(&Method::DELETE);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, Some(json!({"remove_dns": "1"})));
        assert_eq!(requests[1].body, Some(json!({})));
    }
}
