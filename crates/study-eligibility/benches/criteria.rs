//! Criteria benchmarks using divan
//!
//! Compiling versus cached lookup, and evaluation of compiled expressions.

use study_eligibility::{
    ChildEvaluationContext, ExpressionCache, compile_expression, evaluate_criteria,
};

fn main() {
    divan::main();
}

const SIMPLE: &str = "deaf";
const TYPICAL: &str = "(deaf OR hearing_impairment) AND age_in_days >= 365 AND NOT multiple_birth";
const LONG: &str = "(speaks_en OR speaks_fr OR speaks_es OR speaks_de) AND num_languages > 1 \
    AND (gestational_age_in_weeks = na OR gestational_age_in_weeks < 37) \
    AND (gender = female OR gender = other) AND NOT (dyslexia AND autism_spectrum_disorder)";

fn child() -> ChildEvaluationContext {
    ChildEvaluationContext::builder(800)
        .conditions(["deaf"])
        .languages(["en", "fr"])
        .build()
        .unwrap()
}

mod compile {
    use super::*;

    #[divan::bench(args = [SIMPLE, TYPICAL, LONG])]
    fn uncached(bencher: divan::Bencher, source: &str) {
        bencher.bench_local(|| compile_expression(divan::black_box(source)));
    }

    #[divan::bench(args = [SIMPLE, TYPICAL, LONG])]
    fn cached(bencher: divan::Bencher, source: &str) {
        let cache = ExpressionCache::new();
        cache.get_or_compile(source).unwrap();
        bencher.bench_local(|| cache.get_or_compile(divan::black_box(source)));
    }
}

mod evaluate {
    use super::*;

    #[divan::bench(args = [SIMPLE, TYPICAL, LONG])]
    fn compiled(bencher: divan::Bencher, source: &str) {
        let compiled = compile_expression(source).unwrap();
        let ctx = child();
        bencher.bench_local(|| evaluate_criteria(divan::black_box(&compiled), &ctx));
    }
}
