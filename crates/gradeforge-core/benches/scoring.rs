use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradeforge_core::similarity::cosine_similarity;
use gradeforge_core::strategy::Strategy;
use gradeforge_core::text::tokenize;
use gradeforge_core::tfidf::weight_vector;

const STUDENT_ESSAY: &str = "Encapsulation is the bundling of data and the methods that operate \
    on that data into a single unit. It restricts direct access to some of an object's \
    components, which prevents external code from depending on internal representation. \
    Together with inheritance and polymorphism it forms one of the pillars of object \
    oriented programming and supports building large maintainable systems.";

const EXPECTED_ESSAY: &str = "Encapsulation bundles state and behaviour inside a class and \
    hides the internal representation behind a public interface. It is a core principle of \
    object oriented programming alongside inheritance, polymorphism and abstraction.";

fn bench_tfidf_cosine(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf_cosine");

    group.bench_function("weight_vectors", |b| {
        let student = tokenize(STUDENT_ESSAY);
        let expected = tokenize(EXPECTED_ESSAY);
        let docs: [&[String]; 2] = [&student, &expected];
        b.iter(|| {
            (
                weight_vector(black_box(&student), black_box(&docs)),
                weight_vector(black_box(&expected), black_box(&docs)),
            )
        })
    });

    group.bench_function("cosine", |b| {
        let student = tokenize(STUDENT_ESSAY);
        let expected = tokenize(EXPECTED_ESSAY);
        let docs: [&[String]; 2] = [&student, &expected];
        let sv = weight_vector(&student, &docs);
        let ev = weight_vector(&expected, &docs);
        b.iter(|| cosine_similarity(black_box(&sv), black_box(&ev)))
    });

    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");

    group.bench_function("exact_match", |b| {
        b.iter(|| {
            Strategy::ExactMatch.grade(black_box("  Paris "), black_box("paris"), 5.0, None)
        })
    });

    group.bench_function("keyword_overlap", |b| {
        b.iter(|| {
            Strategy::KeywordOverlap.grade(
                black_box(STUDENT_ESSAY),
                black_box(EXPECTED_ESSAY),
                10.0,
                None,
            )
        })
    });

    group.bench_function("vector_similarity", |b| {
        b.iter(|| {
            Strategy::VectorSimilarity.grade(
                black_box(STUDENT_ESSAY),
                black_box(EXPECTED_ESSAY),
                10.0,
                None,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tfidf_cosine, bench_strategies);
criterion_main!(benches);
