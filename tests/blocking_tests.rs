#![cfg(feature = "blocking")]

mod common;

use common::{spawn_live_server, test_config, Reply};
use fishaudio::blocking::FishAudio;
use fishaudio::realtime::{FlushEvent, TextInput};
use fishaudio::types::TtsParams;
use fishaudio::FishAudioError;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn helper_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("helper runtime should build")
}

#[test]
fn blocking_convert_iterates_chunks() {
    let runtime = helper_runtime();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/tts"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio-bytes".to_vec()))
            .mount(&server)
            .await;
        server
    });

    let client = FishAudio::with_config(test_config(&server.uri())).expect("client should build");
    let chunks: Vec<_> = client
        .tts()
        .convert("Hello", &TtsParams::default(), None)
        .expect("convert should succeed")
        .collect::<Result<_, _>>()
        .expect("chunks should arrive");
    let audio: Vec<u8> = chunks.iter().flat_map(|chunk: &bytes::Bytes| chunk.to_vec()).collect();
    assert_eq!(audio, b"audio-bytes");
}

#[test]
fn blocking_account_lookup() {
    let runtime = helper_runtime();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wallet/self/api-credit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "c1",
                "user_id": "u1",
                "credit": 10,
                "created_at": "a",
                "updated_at": "b"
            })))
            .mount(&server)
            .await;
        server
    });

    let client = FishAudio::with_config(test_config(&server.uri())).expect("client should build");
    let credits = client.account().get_credits(None).expect("credits should load");
    assert_eq!(credits.credit.to_f64(), 10.0);
}

#[test]
fn blocking_websocket_feeds_iterator_from_helper_thread() {
    let runtime = helper_runtime();
    let (address, server) = runtime.block_on(spawn_live_server(vec![
        Reply::Audio(b"one".to_vec()),
        Reply::Audio(b"two".to_vec()),
        Reply::Finish("stop"),
    ]));

    let client = FishAudio::with_config(test_config(&format!("http://{address}")))
        .expect("client should build");
    let text = vec![
        TextInput::from("First. "),
        TextInput::from(FlushEvent),
        TextInput::from("Second."),
    ];
    let audio = client
        .tts()
        .stream_websocket(text, &TtsParams::default(), None)
        .expect("session should open")
        .collect_audio()
        .expect("session should finish");
    assert_eq!(&audio[..], b"onetwo");

    let observation = runtime
        .block_on(server)
        .expect("server task should complete");
    assert_eq!(
        observation.events(),
        vec!["start", "text", "flush", "text", "stop"]
    );
}

#[test]
fn blocking_websocket_surfaces_error_finish() {
    let runtime = helper_runtime();
    let (address, _server) = runtime.block_on(spawn_live_server(vec![Reply::Finish("error")]));

    let client = FishAudio::with_config(test_config(&format!("http://{address}")))
        .expect("client should build");
    let mut stream = client
        .tts()
        .stream_websocket(Vec::<String>::new(), &TtsParams::default(), None)
        .expect("session should open");
    assert!(matches!(stream.next(), Some(Err(FishAudioError::WebSocket(_)))));
    assert!(stream.next().is_none());
}
