//! Micro-benchmarks for result decoding and proxy path resolution.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::sync::Arc;
use userapp::{Api, Transport, TransportError, TransportResponse, Value};

/// A `user.get` style payload: nested mappings, per-property overrides,
/// a sequence of permissions.
const SAMPLE_RESPONSE: &str = r#"[
  {
    "user_id": "u-1042",
    "first_name": "Erik",
    "last_name": "Larsson",
    "email": "erik79@example.com",
    "login": "erik79",
    "last_login_at": 1387459780,
    "properties": {
      "age": { "value": 34, "override": false },
      "newsletter": { "value": true, "override": true },
      "plan": { "value": "gold", "override": false }
    },
    "features": {
      "invoicing": { "value": true, "override": false },
      "reports": { "value": false, "override": false }
    },
    "permissions": [
      { "name": "admin", "value": false },
      { "name": "billing", "value": true }
    ],
    "subscription": { "price_list_id": "pl-2", "plan_id": "gold", "override": false },
    "lock": null
  }
]"#;

struct NullTransport;

#[async_trait::async_trait]
impl Transport for NullTransport {
    async fn call(
        &self,
        _method: &str,
        _url: &str,
        _headers: reqwest::header::HeaderMap,
        _body: String,
    ) -> Result<TransportResponse, TransportError> {
        Err(TransportError::Other("benches never dispatch".to_string()))
    }
}

fn bench_api() -> Api {
    Api::builder("bench-app")
        .transport(Arc::new(NullTransport))
        .build()
        .unwrap()
}

fn bench_value(c: &mut Criterion) {
    let raw: serde_json::Value = serde_json::from_str(SAMPLE_RESPONSE).unwrap();

    c.bench_function("value_decode", |b| {
        b.iter_batched(
            || raw.clone(),
            |raw| Value::decode(black_box(raw)),
            BatchSize::SmallInput,
        )
    });

    let value = Value::decode(raw);
    c.bench_function("value_to_json", |b| b.iter(|| black_box(&value).to_json()));
}

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_cached", |b| {
        let api = bench_api();
        api.resolve("user").resolve("payment_method").resolve("search");
        b.iter(|| {
            black_box(
                api.resolve("user").resolve("payment_method").resolve("search"),
            )
        })
    });

    c.bench_function("resolve_first_touch", |b| {
        b.iter_batched(
            bench_api,
            |api| black_box(api.resolve("user").resolve("payment_method").resolve("search")),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_value, bench_resolve);
criterion_main!(benches);
