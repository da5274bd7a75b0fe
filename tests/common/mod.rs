//! Common test utilities

use cep_temperature::config::Config;
use serde_json::{json, Value};

/// API key used against mock weather servers
#[allow(dead_code)]
pub const TEST_API_KEY: &str = "test-api-key";

/// Config pointing both upstreams at mock servers
#[allow(dead_code)]
pub fn config_for(postal_uri: &str, weather_uri: &str, deadline_ms: u64) -> Config {
    let mut config = Config::default();
    config.upstream.postal_base_url = postal_uri.to_string();
    config.upstream.weather_base_url = weather_uri.to_string();
    config.upstream.weather_api_key = TEST_API_KEY.to_string();
    config.lookup.deadline_ms = deadline_ms;
    config.server.enable_request_logging = false;
    config
}

/// ViaCEP body for a known postal code
#[allow(dead_code)]
pub fn viacep_body(cep: &str, city: &str) -> Value {
    json!({
        "cep": cep,
        "logradouro": "Rua Teste",
        "complemento": "",
        "bairro": "Centro",
        "localidade": city,
        "uf": "RJ",
        "ibge": "3301702",
        "gia": "",
        "ddd": "21",
        "siafi": "5833"
    })
}

/// WeatherAPI body with the given readings
#[allow(dead_code)]
pub fn weather_body(city: &str, temp_c: f64, temp_f: f64) -> Value {
    json!({
        "location": {
            "name": city,
            "region": "Rio de Janeiro",
            "country": "Brazil"
        },
        "current": {
            "temp_c": temp_c,
            "temp_f": temp_f,
            "is_day": 1,
            "humidity": 74
        }
    })
}
