use crate::config::Config;
use crate::image_classifier::classification::Freshness;
use crate::image_classifier::error::ClassifyError;
use crate::image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use crate::image_classifier::test::fixture::{encode, fruit_image, solid_image, Fixture};
use crate::image_classifier::tract::image::decode_image;
use crate::library::logger::impl_fake::LoggerFake;
use image::ImageFormat;
use std::path::PathBuf;
use std::sync::Arc;
use tract_onnx::prelude::*;

#[test]
fn test_missing_model_is_a_load_error() {
    let mut config = Config::default();
    config.model.onnx_model_path = PathBuf::from("models/does-not-exist.onnx");

    let result = ImageClassifierTractOnnx::new(config.model, Arc::new(LoggerFake::new()));

    match result {
        Err(ClassifyError::ModelLoad { path, .. }) => {
            assert_eq!(path, PathBuf::from("models/does-not-exist.onnx"));
        }
        Err(error) => panic!("unexpected error: {}", error),
        Ok(_) => panic!("model should not load"),
    }
}

#[test]
#[ignore = "needs models/fresh_fruit_mobilenetv2.onnx"]
fn test_real_model_mid_gray() {
    let Some(f) = Fixture::tract_onnx() else {
        return;
    };
    let input = tract_ndarray::Array4::<f32>::from_elem((1, 224, 224, 3), 0.0).into_tensor();

    let result = f.image_classifier.classify_input(input).unwrap();

    assert!(Freshness::ALL.contains(&result.label));
    assert!(result.confidence > 0.0 && result.confidence < 100.0);
}

#[test]
#[ignore = "needs models/fresh_fruit_mobilenetv2.onnx"]
fn test_real_model_is_deterministic() {
    let Some(f) = Fixture::tract_onnx() else {
        return;
    };
    let bytes = encode(&fruit_image(400), ImageFormat::Png);

    let first = f.image_classifier.classify(&decode_image(&bytes).unwrap()).unwrap();
    let second = f.image_classifier.classify(&decode_image(&bytes).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
#[ignore = "needs models/fresh_fruit_mobilenetv2.onnx"]
fn test_real_model_resolution_does_not_flip_confident_label() {
    let Some(f) = Fixture::tract_onnx() else {
        return;
    };

    let small = f.image_classifier.classify(&fruit_image(320)).unwrap();
    let large = f.image_classifier.classify(&fruit_image(960)).unwrap();

    if small.confidence >= 90.0 && large.confidence >= 90.0 {
        assert_eq!(small.label, large.label);
    }
}

#[test]
fn test_channel_mean_model_mid_gray() {
    let f = Fixture::channel_mean_model();
    let input = tract_ndarray::Array4::<f32>::from_elem((1, 224, 224, 3), 0.0).into_tensor();

    let result = f.image_classifier.classify_input(input).unwrap();

    // Equal channel means give a uniform softmax; the first class wins the tie.
    assert_eq!(result.label, Freshness::Fresh);
    assert_eq!(result.confidence, 33.33);
}

#[test]
fn test_channel_mean_model_brightest_channel_wins() {
    let f = Fixture::channel_mean_model();
    let cases = [
        ([255, 0, 0], Freshness::Fresh),
        ([0, 255, 0], Freshness::Mild),
        ([0, 0, 255], Freshness::Rotten),
    ];

    for (color, expected) in cases {
        let result = f
            .image_classifier
            .classify(&solid_image(300, 170, color))
            .unwrap();

        assert_eq!(result.label, expected);
        assert!(result.confidence > 50.0 && result.confidence < 100.0);
    }
}

#[test]
fn test_channel_mean_model_logs_scores() {
    let f = Fixture::channel_mean_model();

    f.image_classifier
        .classify(&solid_image(64, 64, [0, 255, 0]))
        .unwrap();

    let lines = f.logger.lines();
    assert!(lines
        .iter()
        .any(|line| line.starts_with("INFO image_classifier:tract_onnx: Model ready")));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("INFO image_classifier:tract_onnx: Scores")));
}

#[test]
fn test_channel_mean_model_rejects_wrong_input_shape() {
    let f = Fixture::channel_mean_model();
    let input = tract_ndarray::Array4::<f32>::zeros((1, 100, 100, 3)).into_tensor();

    let error = f.image_classifier.classify_input(input).unwrap_err();

    assert!(matches!(error, ClassifyError::InputShape { .. }));
}
