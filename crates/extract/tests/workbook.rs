use consolidado_extract::{
    extract_campaign_data, list_campaigns, ColumnSelector, ExtractError, Preset,
};
use consolidado_sheet::{Grid, SheetError};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    campaign: &str,
    note: &str,
    validity: Option<((u16, u8, u8), (u16, u8, u8))>,
) {
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    worksheet.write_string(row, 0, campaign).unwrap();
    worksheet.write_string(row, 1, note).unwrap();
    if let Some(((sy, sm, sd), (ey, em, ed))) = validity {
        worksheet
            .write_datetime_with_format(row, 10, &ExcelDateTime::from_ymd(sy, sm, sd).unwrap(), &date_format)
            .unwrap();
        worksheet
            .write_datetime_with_format(row, 11, &ExcelDateTime::from_ymd(ey, em, ed).unwrap(), &date_format)
            .unwrap();
    } else {
        worksheet.write_string(row, 10, "pendiente").unwrap();
        worksheet.write_string(row, 11, "pendiente").unwrap();
    }
}

fn export_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "Consolidado de campañas").unwrap();
    worksheet.write_string(1, 0, "EVENTO / VIGENCIAS").unwrap();
    worksheet.write_string(1, 1, "Nota").unwrap();
    worksheet.write_string(1, 10, "Inicio").unwrap();
    worksheet.write_string(1, 11, "Fin").unwrap();

    write_row(worksheet, 2, "Acme", "enero", Some(((2024, 1, 10), (2024, 1, 20))));
    write_row(worksheet, 3, "acme ", "marzo", Some(((2024, 3, 1), (2024, 3, 31))));
    write_row(worksheet, 4, "Beta", "enero, segunda", Some(((2024, 1, 5), (2024, 2, 5))));
    write_row(worksheet, 5, "Acme", "sin fecha", None);
    write_row(worksheet, 6, "Gamma", "enero", Some(((2024, 1, 1), (2024, 1, 31))));

    workbook.save_to_buffer().unwrap()
}

fn two_columns_and_dates() -> ColumnSelector {
    "0-2,10-12".parse().unwrap()
}

#[test]
fn test_extract_campaign_data_to_csv() {
    let csv = extract_campaign_data(
        &export_bytes(),
        &["ACME", " beta"],
        "2024-01-15",
        "2024-02-01",
        &two_columns_and_dates(),
    )
    .unwrap();

    assert_eq!(
        csv,
        "EVENTO / VIGENCIAS,Nota,Inicio,Fin\n\
         Acme,enero,2024-01-10,2024-01-20\n\
         Beta,\"enero, segunda\",2024-01-05,2024-02-05\n"
    );
}

#[test]
fn test_extract_campaign_data_with_preset() {
    let csv = extract_campaign_data(
        &export_bytes(),
        &["Acme"],
        "2024-01-01",
        "2024-12-31",
        &ColumnSelector::preset(Preset::Compact),
    )
    .unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line.split(',').count(), 53);
    }
}

#[test]
fn test_invalid_range_date() {
    let err = extract_campaign_data(
        &export_bytes(),
        &["Acme"],
        "primero de enero",
        "2024-12-31",
        &two_columns_and_dates(),
    )
    .unwrap_err();

    assert!(matches!(err, ExtractError::InvalidDate { value } if value == "primero de enero"));
}

#[test]
fn test_missing_header_in_workbook() {
    let mut workbook = Workbook::new();
    workbook
        .add_worksheet()
        .write_string(0, 0, "Campaña")
        .unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let err = extract_campaign_data(&bytes, &["Acme"], "2024-01-01", "2024-12-31", &two_columns_and_dates())
        .unwrap_err();
    assert!(matches!(err, ExtractError::HeaderNotFound));
}

#[test]
fn test_corrupt_workbook_propagates() {
    let err = extract_campaign_data(
        b"PK not really a zip",
        &["Acme"],
        "2024-01-01",
        "2024-12-31",
        &two_columns_and_dates(),
    )
    .unwrap_err();

    assert!(matches!(err, ExtractError::Sheet(SheetError::Workbook(_))));
}

#[test]
fn test_list_campaigns_from_workbook() {
    let grid = Grid::from_workbook_bytes(&export_bytes()).unwrap();
    assert_eq!(list_campaigns(&grid).unwrap(), vec!["Acme", "Beta", "Gamma"]);
}
