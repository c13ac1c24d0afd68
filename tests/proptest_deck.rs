use pitchdeck::deck::{build_and_save, build_deck, AssembleOptions, IssueCode};
use pitchdeck::pptx::read_pptx;
use proptest::prelude::*;

mod common;
mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn slide_count_matches_records_regardless_of_images(
        records in proptest_helpers::arb_records(8),
        plans in proptest_helpers::arb_plans(10),
    ) {
        let temp = tempfile::tempdir().expect("create temp dir");
        let images = proptest_helpers::materialize(temp.path(), &plans);

        let (deck, report) = build_deck(&records, &images, &AssembleOptions::default());
        prop_assert_eq!(deck.slides.len(), records.len());
        prop_assert_eq!(report.slide_count, records.len());

        for (idx, slide) in deck.slides.iter().enumerate() {
            let expected = proptest_helpers::expects_picture(plans.get(idx));
            prop_assert_eq!(slide.picture.is_some(), expected, "slide {}", idx);

            if !images.contains_key(&idx) {
                prop_assert_eq!(report.issues_for(idx).count(), 0);
            }
        }

        for issue in &report.issues {
            if issue.code == IssueCode::ImageIndexOutOfRange {
                prop_assert!(issue.slide >= records.len());
            } else {
                prop_assert!(issue.slide < records.len());
            }
        }
    }

    #[test]
    fn written_text_survives_read_back(
        records in proptest_helpers::arb_records(6),
    ) {
        let temp = tempfile::tempdir().expect("create temp dir");
        let output = temp.path().join("deck.pptx");

        build_and_save(&records, &Default::default(), &output, &AssembleOptions::default())
            .expect("build and save");
        let summary = read_pptx(&output).expect("read back");

        prop_assert_eq!(summary.slides.len(), records.len());
        for (slide, record) in summary.slides.iter().zip(&records) {
            prop_assert_eq!(&slide.title, &proptest_helpers::read_back_text(&record.title));
            prop_assert_eq!(&slide.body, &proptest_helpers::read_back_text(&record.content));
            prop_assert_eq!(slide.pictures, 0);
        }
    }
}
