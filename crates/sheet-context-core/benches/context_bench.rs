use criterion::{criterion_group, criterion_main, Criterion};
use sheet_context_core::{format_for_model, search, summarize, CellValue, Sheet};

fn mk_sheet(index: usize, rows: usize) -> Sheet {
    let headers = ["Id", "Region", "Status", "Amount", "Verified"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let data = (0..rows)
        .map(|row| {
            vec![
                CellValue::Text(format!("rec-{index}-{row}")),
                CellValue::Text(["north", "south", "east", "west"][row % 4].to_string()),
                CellValue::Text(if row % 3 == 0 { "pending" } else { "clear" }.to_string()),
                CellValue::Number(f64::from(u32::try_from(row).unwrap_or(u32::MAX)) * 1.25),
                CellValue::Boolean(row % 2 == 0),
            ]
        })
        .collect();
    Sheet::new(format!("Sheet{index}"), headers, data)
}

fn bench_workbook_views(c: &mut Criterion) {
    let sheets = (0..4).map(|index| mk_sheet(index, 5_000)).collect::<Vec<_>>();

    c.bench_function("search_substring_20k_rows", |b| {
        b.iter(|| search("pending", &sheets));
    });
    c.bench_function("format_for_model_4_sheets", |b| {
        b.iter(|| format_for_model(&sheets));
    });
    c.bench_function("summarize_4_sheets", |b| {
        b.iter(|| summarize(&sheets));
    });
}

criterion_group!(benches, bench_workbook_views);
criterion_main!(benches);
