//! Staking snapshots read through the node JSON-RPC client.
use codec::Encode;
use extractor::{
    NodeClient, StakingState,
    staking::{Exposure, IndividualExposure, eras_stakers_key, eras_total_stake_key, validators_prefix},
};
use mockito::{Matcher, Mock, ServerGuard};
use primitives::{records::ValidatorExposure, sources::StakingQuery};
use serde_json::{Value, json};
use url::Url;

const AT: &str = "0x5e1a";
const ERA: u32 = 42;

async fn rpc(server: &mut ServerGuard, method: &str, result: Value) -> Mock {
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": method })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |req| {
            let body: Value = serde_json::from_slice(req.body().unwrap()).unwrap();
            json!({ "jsonrpc": "2.0", "id": body["id"], "result": result }).to_string().into()
        })
        .create_async()
        .await
}

fn encoded_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[tokio::test]
async fn snapshot_over_json_rpc() {
    let mut server = mockito::Server::new_async().await;
    let (alice, bob) = ([0xa1u8; 20], [0xb0u8; 20]);

    let total = rpc(&mut server, "state_getStorage", json!(encoded_hex(&7_500_000u128.encode()))).await;
    let keys = rpc(
        &mut server,
        "state_getKeysPaged",
        json!([
            validators_prefix().twox64_concat(&alice).to_hex(),
            validators_prefix().twox64_concat(&bob).to_hex(),
        ]),
    )
    .await;
    let alice_exposure = Exposure {
        total: 3_000_000,
        own: 1_000_000,
        others: vec![
            IndividualExposure { who: [1; 20], value: 1_000_000 },
            IndividualExposure { who: [2; 20], value: 1_000_000 },
        ],
    };
    let stakers = rpc(
        &mut server,
        "state_queryStorageAt",
        json!([{
            "block": AT,
            "changes": [
                [eras_stakers_key(ERA, &bob).to_hex(), null],
                [eras_stakers_key(ERA, &alice).to_hex(), encoded_hex(&alice_exposure.encode())],
            ]
        }]),
    )
    .await;

    let node = NodeClient::new(Url::parse(&server.url()).unwrap());
    let snapshot = StakingState::new(node).staking_snapshot(AT, ERA).await.unwrap();

    assert_eq!(snapshot.total_stake, 7_500_000);
    assert_eq!(snapshot.exposures, vec![
        ValidatorExposure { own: 1_000_000, nominators: 2 },
        ValidatorExposure { own: 0, nominators: 0 },
    ]);
    for mock in [total, keys, stakers] {
        mock.assert_async().await;
    }
}

#[test]
fn total_stake_key_is_era_scoped() {
    assert_ne!(eras_total_stake_key(1), eras_total_stake_key(2));
    assert!(eras_total_stake_key(1).starts_with(&extractor::StorageKey::prefix("Staking", "ErasTotalStake")));
}
