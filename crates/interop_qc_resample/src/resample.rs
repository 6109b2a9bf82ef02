use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::record_batch::RecordBatch;
use interop_qc_core::rename::update_plot_input;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

/// Row kind whose `plot_input_data` cell embeds a JSON document keyed on the
/// sample name.
pub const PLOT_INPUT_TYPE: &str = "plot_input";
/// Row kind whose `sample` cell carries the sample name directly.
pub const PLOT_INPUT_ROW_TYPE: &str = "plot_input_row";

/// Rewrite the sample name throughout a MultiQC parquet report. Returns the
/// number of rows rewritten. The output path may equal the input path: the
/// whole table is rewritten in memory before the output file is opened.
pub fn update_sample_names_in_parquet(
    input_parquet_file: &Path,
    output_parquet_file: &Path,
    old_sample_name: &str,
    new_sample_name: &str,
) -> Result<usize, String> {
    let file = File::open(input_parquet_file).map_err(|error| {
        format!(
            "failed to open '{}': {error}",
            input_parquet_file.display()
        )
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|error| format!("failed to read parquet metadata: {error}"))?;
    let schema = builder.schema().clone();
    let reader = builder
        .build()
        .map_err(|error| format!("failed to open parquet reader: {error}"))?;

    let mut rows_rewritten = 0usize;
    let mut updated_batches = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|error| format!("failed to read parquet batch: {error}"))?;
        let (updated, rewritten) =
            update_sample_names_in_batch(&batch, old_sample_name, new_sample_name)?;
        rows_rewritten += rewritten;
        updated_batches.push(updated);
    }

    let output = File::create(output_parquet_file).map_err(|error| {
        format!(
            "failed to create '{}': {error}",
            output_parquet_file.display()
        )
    })?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(output, schema, Some(props))
        .map_err(|error| format!("failed to open parquet writer: {error}"))?;
    for batch in &updated_batches {
        writer
            .write(batch)
            .map_err(|error| format!("failed to write parquet batch: {error}"))?;
    }
    writer
        .close()
        .map_err(|error| format!("failed to close parquet writer: {error}"))?;

    Ok(rows_rewritten)
}

/// Rewrite one record batch, returning the updated batch and the number of
/// rows touched. Columns other than `plot_input_data` and `sample` pass
/// through unchanged.
pub fn update_sample_names_in_batch(
    batch: &RecordBatch,
    old_sample_name: &str,
    new_sample_name: &str,
) -> Result<(RecordBatch, usize), String> {
    let (_, row_types) = string_column(batch, "type")?;
    let (plot_input_index, plot_inputs) = string_column(batch, "plot_input_data")?;
    let (sample_index, samples) = string_column(batch, "sample")?;

    let mut rows_rewritten = 0usize;
    let mut updated_plot_inputs: Vec<Option<String>> = Vec::with_capacity(batch.num_rows());
    let mut updated_samples: Vec<Option<String>> = Vec::with_capacity(batch.num_rows());

    for row in 0..batch.num_rows() {
        let row_type = if row_types.is_null(row) {
            ""
        } else {
            row_types.value(row)
        };
        let plot_input = (!plot_inputs.is_null(row)).then(|| plot_inputs.value(row));
        let sample = (!samples.is_null(row)).then(|| samples.value(row));

        if row_type == PLOT_INPUT_TYPE {
            let updated = match plot_input {
                Some(document) => Some(
                    update_plot_input(document, old_sample_name, new_sample_name).map_err(
                        |error| format!("row {row} has malformed plot_input_data: {error}"),
                    )?,
                ),
                None => None,
            };
            rows_rewritten += 1;
            updated_plot_inputs.push(updated);
            updated_samples.push(sample.map(str::to_string));
        } else if row_type == PLOT_INPUT_ROW_TYPE {
            rows_rewritten += 1;
            updated_plot_inputs.push(plot_input.map(str::to_string));
            updated_samples.push(Some(new_sample_name.to_string()));
        } else {
            updated_plot_inputs.push(plot_input.map(str::to_string));
            updated_samples.push(sample.map(str::to_string));
        }
    }

    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    columns[plot_input_index] = Arc::new(StringArray::from(updated_plot_inputs));
    columns[sample_index] = Arc::new(StringArray::from(updated_samples));

    let updated = RecordBatch::try_new(batch.schema(), columns)
        .map_err(|error| format!("failed to rebuild parquet batch: {error}"))?;
    Ok((updated, rows_rewritten))
}

fn string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<(usize, &'a StringArray), String> {
    let index = batch
        .schema()
        .index_of(name)
        .map_err(|_| format!("parquet file has no '{name}' column"))?;
    let column = batch
        .column(index)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| format!("'{name}' column is not a string column"))?;
    Ok((index, column))
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;

    fn multiqc_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("type", DataType::Utf8, true),
            Field::new("anchor", DataType::Utf8, true),
            Field::new("plot_input_data", DataType::Utf8, true),
            Field::new("sample", DataType::Utf8, true),
        ]));

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![
                    Some("plot_input"),
                    Some("plot_input_row"),
                    Some("run_metadata"),
                ])) as ArrayRef,
                Arc::new(StringArray::from(vec![
                    Some("fastqc_per_base_plot"),
                    Some("general_stats_table"),
                    Some("header"),
                ])),
                Arc::new(StringArray::from(vec![
                    Some(r#"[{"data":{"L2301197":{"name":"L2301197"}}}]"#),
                    None,
                    None,
                ])),
                Arc::new(StringArray::from(vec![None, Some("L2301197"), None])),
            ],
        )
        .expect("fixture batch should build")
    }

    #[test]
    fn rewrites_plot_input_and_sample_rows_only() {
        let (updated, rows_rewritten) =
            update_sample_names_in_batch(&multiqc_batch(), "L2301197", "L2301197_rerun")
                .expect("batch should rewrite");

        assert_eq!(rows_rewritten, 2);

        let (_, plot_inputs) = string_column(&updated, "plot_input_data").expect("column exists");
        assert_eq!(
            plot_inputs.value(0),
            r#"[{"data":{"L2301197_rerun":{"name":"L2301197_rerun"}}}]"#
        );

        let (_, samples) = string_column(&updated, "sample").expect("column exists");
        assert!(samples.is_null(0));
        assert_eq!(samples.value(1), "L2301197_rerun");
        assert!(samples.is_null(2));

        // Untouched columns come through as-is.
        let (_, anchors) = string_column(&updated, "anchor").expect("column exists");
        assert_eq!(anchors.value(2), "header");
    }

    #[test]
    fn malformed_plot_input_is_an_error() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("type", DataType::Utf8, true),
            Field::new("plot_input_data", DataType::Utf8, true),
            Field::new("sample", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![Some("plot_input")])) as ArrayRef,
                Arc::new(StringArray::from(vec![Some("{not json")])),
                Arc::new(StringArray::from(vec![None::<String>])),
            ],
        )
        .expect("fixture batch should build");

        let error = update_sample_names_in_batch(&batch, "a", "b")
            .expect_err("malformed plot input should fail");
        assert!(error.contains("malformed plot_input_data"));
    }

    #[test]
    fn missing_type_column_is_an_error() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "sample",
            DataType::Utf8,
            true,
        )]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(StringArray::from(vec![Some("L2301197")])) as ArrayRef],
        )
        .expect("fixture batch should build");

        let error =
            update_sample_names_in_batch(&batch, "a", "b").expect_err("missing column should fail");
        assert!(error.contains("'type' column"));
    }

    #[test]
    fn parquet_file_rewrites_in_place() {
        let dir = tempfile::tempdir().expect("temp dir should create");
        let path = dir.path().join("multiqc.parquet");

        let batch = multiqc_batch();
        let file = File::create(&path).expect("parquet file should create");
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)
            .expect("parquet writer should open");
        writer.write(&batch).expect("parquet batch should write");
        writer.close().expect("parquet writer should close");

        let rows_rewritten =
            update_sample_names_in_parquet(&path, &path, "L2301197", "L2301197_rerun")
                .expect("parquet file should rewrite");
        assert_eq!(rows_rewritten, 2);

        let reopened = File::open(&path).expect("parquet file should reopen");
        let reader = ParquetRecordBatchReaderBuilder::try_new(reopened)
            .expect("parquet reader should build")
            .build()
            .expect("parquet reader should open");
        let batches: Vec<RecordBatch> = reader
            .collect::<Result<_, _>>()
            .expect("parquet batches should read");

        assert_eq!(batches.len(), 1);
        let (_, samples) = string_column(&batches[0], "sample").expect("column exists");
        assert_eq!(samples.value(1), "L2301197_rerun");
    }
}
