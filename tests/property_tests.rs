use proptest::prelude::*;
use shoutsrv::ShoutClient;
use shoutsrv::test_utils::spawn_test_responder;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: any valid UTF-8 message is acknowledged with the exact
    /// uppercased text and the client's own (address, port) pair.
    #[test]
    fn acknowledgement_matches_uppercased_input(text in ".*") {
        tokio_test::block_on(async {
            let (server_handle, addr, _shutdown) = spawn_test_responder()
                .map_err(|e| TestCaseError::fail(format!("Server setup failed: {e}")))?;

            let client = ShoutClient::connect(addr).await
                .map_err(|e| TestCaseError::fail(format!("Client connection failed: {e}")))?;
            let local = client.local_addr()
                .map_err(|e| TestCaseError::fail(format!("No local address: {e}")))?;

            let reply = client.request_string(&text).await
                .map_err(|e| TestCaseError::fail(format!("Request failed: {e}")))?;

            server_handle.abort();

            let expected = format!(
                "Server received your message: {}, client: {local}",
                text.to_uppercase()
            );
            prop_assert_eq!(reply, expected);
            Ok(())
        })?;
    }

    /// Property: uppercasing twice is the same as uppercasing once, so
    /// replaying a server reply body yields itself back.
    #[test]
    fn acknowledgement_body_is_stable_under_replay(text in "[a-zA-Z0-9 ]{0,64}") {
        tokio_test::block_on(async {
            let (server_handle, addr, _shutdown) = spawn_test_responder()
                .map_err(|e| TestCaseError::fail(format!("Server setup failed: {e}")))?;

            let upper = text.to_uppercase();
            let client = ShoutClient::connect(addr).await
                .map_err(|e| TestCaseError::fail(format!("Client connection failed: {e}")))?;
            let reply = client.request_string(&upper).await
                .map_err(|e| TestCaseError::fail(format!("Request failed: {e}")))?;

            server_handle.abort();

            prop_assert!(reply.contains(&upper));
            Ok(())
        })?;
    }

    /// Property: any payload that is not valid UTF-8 is dropped without
    /// a reply, and the responder keeps serving afterwards.
    #[test]
    fn invalid_utf8_yields_no_reply(tail in prop::collection::vec(any::<u8>(), 0..256)) {
        tokio_test::block_on(async {
            let (server_handle, addr, _shutdown) = spawn_test_responder()
                .map_err(|e| TestCaseError::fail(format!("Server setup failed: {e}")))?;

            // 0xFF never occurs in well-formed UTF-8, so the payload is
            // invalid no matter what the tail contains
            let mut payload = vec![0xFFu8];
            payload.extend_from_slice(&tail);

            let client = ShoutClient::connect(addr).await
                .map_err(|e| TestCaseError::fail(format!("Client connection failed: {e}")))?;
            let reply = client.request(&payload).await
                .map_err(|e| TestCaseError::fail(format!("Request failed: {e}")))?;
            prop_assert!(reply.is_empty());

            // Server must still be accepting
            let client = ShoutClient::connect(addr).await
                .map_err(|e| TestCaseError::fail(format!("Reconnect failed: {e}")))?;
            let reply = client.request_string("ok").await
                .map_err(|e| TestCaseError::fail(format!("Second request failed: {e}")))?;

            server_handle.abort();

            prop_assert!(reply.contains("OK"));
            Ok(())
        })?;
    }
}
