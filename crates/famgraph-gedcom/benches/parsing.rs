use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use famgraph_gedcom::{build_records, tokenize, GedcomParser, GenealogyParser};
use std::fmt::Write;
use std::path::Path;

/// A synthetic file: `families` couples, each with two children.
fn synthetic_gedcom(families: usize) -> String {
    let mut out = String::from("0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR UTF-8\n");
    for f in 0..families {
        let (h, w, c1, c2) = (4 * f, 4 * f + 1, 4 * f + 2, 4 * f + 3);
        for (id, name, sex, famc) in [
            (h, "Father", "M", false),
            (w, "Mother", "F", false),
            (c1, "Son", "M", true),
            (c2, "Daughter", "F", true),
        ] {
            let _ = write!(
                out,
                "0 @I{id}@ INDI\n1 NAME {name} /Family{f}/\n1 SEX {sex}\n1 BIRT\n2 DATE ABT {}\n2 PLAC Town {}\n",
                1800 + id % 150,
                f % 40
            );
            let link = if famc { "FAMC" } else { "FAMS" };
            let _ = writeln!(out, "1 {link} @F{f}@");
            let _ = writeln!(out, "1 NOTE Lived a long life\n2 CONC  in Town {}.", f % 40);
        }
        let _ = write!(
            out,
            "0 @F{f}@ FAM\n1 HUSB @I{h}@\n1 WIFE @I{w}@\n1 CHIL @I{c1}@\n1 CHIL @I{c2}@\n1 MARR\n2 DATE {}\n",
            1790 + f % 150
        );
    }
    out.push_str("0 TRLR\n");
    out
}

fn bench_stages(c: &mut Criterion) {
    let source = synthetic_gedcom(500);
    let mut group = c.benchmark_group("stages");

    group.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(&source)));
    });

    group.bench_function("tokenize_and_build", |b| {
        b.iter(|| build_records(tokenize(black_box(&source)).0));
    });

    group.finish();
}

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_parse");
    let parser = GedcomParser::new();

    for families in [10, 100, 1000] {
        let source = synthetic_gedcom(families);
        group.bench_with_input(BenchmarkId::from_parameter(families), &source, |b, source| {
            b.iter(|| {
                parser
                    .parse_source(black_box(source), Path::new("bench.ged"))
                    .unwrap()
            });
        });
    }

    group.bench_function("fixture", |b| {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/family.ged");
        b.iter(|| parser.parse_file(black_box(&path)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_stages, bench_full_parse);
criterion_main!(benches);
