mod helpers;

use helpers::{setup_test_client, AUTH_HEADER};
use mockito::Matcher;
use vdocipher_api_client::{OtpOptions, VdoCipherError, VideoListQuery};

#[tokio::test]
async fn test_get_video() {
    let (mut server, client) = setup_test_client().await;

    let mock = server
        .mock("GET", "/videos/video123")
        .match_header("authorization", AUTH_HEADER)
        .with_status(200)
        .with_body(r#"{"id":"video123","title":"Test Video","status":"ready"}"#)
        .create_async()
        .await;

    let video = client.get_video("video123").await.unwrap();

    mock.assert_async().await;
    assert_eq!(video["id"], "video123");
    assert_eq!(video["status"], "ready");
}

#[tokio::test]
async fn test_get_videos_without_filters() {
    let (mut server, client) = setup_test_client().await;

    let mock = server
        .mock("GET", "/videos")
        .match_header("authorization", AUTH_HEADER)
        .with_status(200)
        .with_body(
            r#"{"rows":[{"id":"video123","title":"Test Video 1"},{"id":"video456","title":"Test Video 2"}],"count":2}"#,
        )
        .create_async()
        .await;

    let result = client.get_videos(&VideoListQuery::default()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result["count"], 2);
    assert_eq!(result["rows"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_get_videos_with_filters() {
    let (mut server, client) = setup_test_client().await;

    let mock = server
        .mock("GET", "/videos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "40".into()),
            Matcher::UrlEncoded("tags".into(), "Course1,Promo".into()),
            Matcher::UrlEncoded("q".into(), "Intro".into()),
            Matcher::UrlEncoded("folderId".into(), "root".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"rows":[],"count":0}"#)
        .create_async()
        .await;

    let query = VideoListQuery {
        page: Some(2),
        limit: Some(40),
        tags: Some("Course1,Promo".to_string()),
        q: Some("Intro".to_string()),
        folder_id: Some("root".to_string()),
    };
    let result = client.get_videos(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result["count"], 0);
}

#[tokio::test]
async fn test_get_metadata() {
    let (mut server, client) = setup_test_client().await;

    let mock = server
        .mock("GET", "/meta/video123")
        .match_header("authorization", AUTH_HEADER)
        .with_status(200)
        .with_body(r#"{"id":"video123","length":120,"posters":[]}"#)
        .create_async()
        .await;

    let meta = client.get_metadata("video123").await.unwrap();

    mock.assert_async().await;
    assert_eq!(meta["length"], 120);
}

#[tokio::test]
async fn test_delete_video_success() {
    let (mut server, client) = setup_test_client().await;

    let mock = server
        .mock("DELETE", "/videos")
        .match_header("authorization", AUTH_HEADER)
        .match_query(Matcher::UrlEncoded("videos".into(), "video123".into()))
        .with_status(204)
        .create_async()
        .await;

    let deleted = client.delete_video("video123").await.unwrap();

    mock.assert_async().await;
    assert!(deleted);
}

#[tokio::test]
async fn test_delete_video_failure_returns_false() {
    let (mut server, client) = setup_test_client().await;

    let mock = server
        .mock("DELETE", "/videos")
        .match_query(Matcher::UrlEncoded("videos".into(), "video123".into()))
        .with_status(404)
        .with_body(r#"{"message":"Video not found"}"#)
        .create_async()
        .await;

    let deleted = client.delete_video("video123").await.unwrap();

    mock.assert_async().await;
    assert!(!deleted);
}

#[tokio::test]
async fn test_get_video_details_merges_otp() {
    let (mut server, client) = setup_test_client().await;

    let otp_mock = server
        .mock("POST", "/videos/video123/otp")
        .with_status(200)
        .with_body(r#"{"otp":"test-otp","playbackInfo":"test-playback-info"}"#)
        .create_async()
        .await;
    let video_mock = server
        .mock("GET", "/videos/video123")
        .with_status(200)
        .with_body(r#"{"id":"video123","title":"Test Video","status":"ready"}"#)
        .create_async()
        .await;

    let details = client
        .get_video_details("video123", &OtpOptions::default())
        .await
        .unwrap();

    otp_mock.assert_async().await;
    video_mock.assert_async().await;
    assert_eq!(details["id"], "video123");
    assert_eq!(details["title"], "Test Video");
    assert_eq!(details["status"], "ready");
    assert_eq!(details["otp"]["otp"], "test-otp");
    assert_eq!(details["otp"]["playbackInfo"], "test-playback-info");
}

#[tokio::test]
async fn test_get_video_details_rejects_list_record() {
    let (mut server, client) = setup_test_client().await;

    server
        .mock("POST", "/videos/video123/otp")
        .with_status(200)
        .with_body(r#"{"otp":"test-otp"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/videos/video123")
        .with_status(200)
        .with_body(r#"["video123"]"#)
        .create_async()
        .await;

    let err = client
        .get_video_details("video123", &OtpOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, VdoCipherError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_get_video_details_stops_when_otp_fails() {
    let (mut server, client) = setup_test_client().await;

    server
        .mock("POST", "/videos/video123/otp")
        .with_status(403)
        .with_body(r#"{"message":"Forbidden"}"#)
        .create_async()
        .await;
    let video_mock = server
        .mock("GET", "/videos/video123")
        .expect(0)
        .create_async()
        .await;

    let err = client
        .get_video_details("video123", &OtpOptions::default())
        .await
        .unwrap_err();

    video_mock.assert_async().await;
    assert_eq!(err.status(), Some(403));
}
