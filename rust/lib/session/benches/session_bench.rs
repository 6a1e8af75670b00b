use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tempfile::TempDir;

use rentdesk_kv::{MemoryKV, RedbStore};
use rentdesk_session::{Session, SessionStore, TokenRecord, UserSnapshot};

fn sample_session() -> Session {
    Session {
        token: TokenRecord {
            token_type: "Bearer".into(),
            access_token: "a".repeat(400),
            refresh_token: "r".repeat(400),
        },
        user: UserSnapshot {
            id: 1,
            username: "bench".into(),
            email: "bench@example.com".into(),
            firstname: "Bench".into(),
            lastname: "Mark".into(),
            roles: vec!["USER".into(), "ADMIN".into()],
        },
    }
}

fn bench_memory_authorization(c: &mut Criterion) {
    let store = SessionStore::new(Arc::new(MemoryKV::new()));
    store.save(&sample_session()).unwrap();

    c.bench_function("memory_authorization", |b| {
        b.iter(|| black_box(store.authorization()));
    });
}

fn bench_redb_authorization(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    let store = SessionStore::new(Arc::new(
        RedbStore::open(&tmp.path().join("bench.redb")).unwrap(),
    ));
    store.save(&sample_session()).unwrap();

    c.bench_function("redb_authorization", |b| {
        b.iter(|| black_box(store.authorization()));
    });
}

fn bench_redb_save(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    let store = SessionStore::new(Arc::new(
        RedbStore::open(&tmp.path().join("bench.redb")).unwrap(),
    ));
    let session = sample_session();

    c.bench_function("redb_save", |b| {
        b.iter(|| store.save(black_box(&session)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_memory_authorization,
    bench_redb_authorization,
    bench_redb_save
);
criterion_main!(benches);
