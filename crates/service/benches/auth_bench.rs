use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use serde_json::json;
use service::args::from_json;
use service::auth::repository::mock::MockAccountRepository;
use service::auth::{AccountService, CredentialConfig, CredentialService};

fn bench_login(c: &mut Criterion) {
    let creds = CredentialService::new(CredentialConfig { jwt_secret: Some("secret".into()), ..CredentialConfig::default() }).unwrap();
    let svc = AccountService::new(Arc::new(MockAccountRepository::default()), Arc::new(creds));

    // pre-create the account outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let signup = from_json(json!({"username": "bench", "email": "bench@example.com", "password": "Benchmark1"}));
    rt.block_on(svc.signup(&signup)).unwrap();

    let login = from_json(json!({"email": "bench@example.com", "password": "Benchmark1"}));
    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.login(&login)).unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
