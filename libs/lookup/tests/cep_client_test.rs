//! Contract tests for CepClient against a mock ViaCEP.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `/{cep}/json/` | `fetch_*` |

use onboard_lookup::{LookupClient, LookupConfig, LookupError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> LookupClient {
    let config = LookupConfig::local_mock(&server.uri()).unwrap();
    LookupClient::new(&config).unwrap()
}

#[tokio::test]
async fn fetch_returns_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/01310100/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "complemento": "de 612 a 1510 - lado par",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "gia": "1004",
            "ddd": "11",
            "siafi": "7107"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let address = client.cep().fetch("01310-100").await.unwrap();

    assert_eq!(address.street, "Avenida Paulista");
    assert_eq!(address.district, "Bela Vista");
    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.state, "SP");
    assert_eq!(address.ddd, "11");
}

#[tokio::test]
async fn fetch_tolerates_missing_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/69900970/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "69900-970",
            "localidade": "Rio Branco",
            "uf": "AC"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let address = client.cep().fetch("69900970").await.unwrap();

    assert_eq!(address.city, "Rio Branco");
    assert!(address.street.is_empty());
}

#[tokio::test]
async fn fetch_erro_body_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/99999999/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": true })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.cep().fetch("99999-999").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, LookupError::CepNotFound { ref cep } if cep == "99999999"));
}

#[tokio::test]
async fn fetch_malformed_cep_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.cep().fetch("123").await.unwrap_err();

    assert!(matches!(err, LookupError::InvalidCep { digits: 3 }));
}

#[tokio::test]
async fn fetch_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/01310100/json/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.cep().fetch("01310100").await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn fetch_non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/01310100/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.cep().fetch("01310100").await.unwrap_err();

    assert!(matches!(err, LookupError::Decode { .. }));
}
