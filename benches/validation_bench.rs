use ai_api_contract::{
    catalog::{Catalog, OperationKind},
    validation::{check_request, validate_request, validate_response, ValidationOptions},
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn bench_requests(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let chat = catalog.get(OperationKind::Chat);
    let body = json!({
        "providers": ["openai", "anthropic"],
        "fallback_providers": ["google"],
        "text": "What is the capital of France?",
        "chatbot_global_action": "Act as a helpful assistant",
        "previous_history": [
            {"role": "user", "message": "Hi"},
            {"role": "assistant", "message": "Hello, how can I help?"}
        ],
        "temperature": 0.7,
        "max_tokens": 256
    });

    c.bench_function("schema_chat_request", |b| {
        b.iter(|| validate_request(black_box(chat), black_box(&body), ValidationOptions::strict()))
    });

    c.bench_function("typed_chat_request", |b| {
        b.iter(|| check_request(OperationKind::Chat, black_box(&body), ValidationOptions::default()))
    });

    c.bench_function("every_example_request", |b| {
        let examples: Vec<_> = catalog.iter().map(|op| (op, op.example_request())).collect();
        b.iter(|| {
            for (op, example) in &examples {
                let _ = validate_request(op, black_box(example), ValidationOptions::default());
            }
        })
    });
}

fn bench_responses(c: &mut Criterion) {
    let anonymization = Catalog::builtin().get(OperationKind::Anonymization);
    let entity = json!({
        "offset": 11,
        "length": 4,
        "category": "PersonalInformation",
        "subcategory": "Name",
        "original_label": "PERSON",
        "content": "John",
        "confidence_score": 0.93
    });
    let envelope = json!({
        "status": "sucess",
        "result": "My name is ****",
        "entities": vec![entity; 50],
        "cost": 0.0005
    });
    let body = json!({
        "amazon": envelope.clone(),
        "microsoft": envelope,
        "openai": {"status": "fail", "error": {"message": "Rate limited", "type": "ProviderLimitationError"}}
    });

    c.bench_function("anonymization_response_3_providers", |b| {
        b.iter(|| validate_response(black_box(anonymization), black_box(&body), ValidationOptions::default()))
    });
}

criterion_group!(benches, bench_requests, bench_responses);
criterion_main!(benches);
