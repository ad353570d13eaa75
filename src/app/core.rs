use crate::image_classifier::classification::ClassificationResult;
use crate::image_classifier::error::ClassifyError;
use crate::image_classifier::tract::image::decode_image;
use image::DynamicImage;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Upload {
    pub name: String,
    pub image: Arc<DynamicImage>,
}

/// Session state of one window.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub uploaded_filename: Option<String>,
    pub upload: Option<Upload>,
    pub results: Option<ClassificationResult>,
    pub classified: bool,
    pub analyzing: bool,
    pub error: Option<String>,
}

impl Model {
    pub fn can_classify(&self) -> bool {
        self.upload.is_some() && !self.analyzing
    }
}

#[derive(Debug)]
pub enum Msg {
    FileUploaded { name: String, bytes: Vec<u8> },
    FileUnreadable { name: String, message: String },
    ClassifyClicked,
    ClassifyDone {
        name: String,
        result: Result<ClassificationResult, ClassifyError>,
    },
    DismissError,
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::FileUploaded { name, bytes } => {
                format!("FileUploaded {{ name: {:?}, bytes: {} }}", name, bytes.len())
            }
            msg => format!("{:?}", msg),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Effect {
    Classify {
        name: String,
        image: Arc<DynamicImage>,
    },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Classify { name, image } => format!(
                "Classify {{ name: {:?}, image: {}x{} }}",
                name,
                image.width(),
                image.height()
            ),
        }
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![])
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::FileUploaded { name, bytes } => {
            let model = with_new_filename(model, &name);
            match decode_image(&bytes) {
                Ok(image) => (
                    Model {
                        upload: Some(Upload {
                            name,
                            image: Arc::new(image),
                        }),
                        error: None,
                        ..model
                    },
                    vec![],
                ),
                Err(error) => (
                    Model {
                        upload: None,
                        error: Some(format!("Could not open {}: {}", name, error)),
                        ..model
                    },
                    vec![],
                ),
            }
        }

        Msg::FileUnreadable { name, message } => {
            let model = with_new_filename(model, &name);
            (
                Model {
                    upload: None,
                    error: Some(format!("Could not read {}: {}", name, message)),
                    ..model
                },
                vec![],
            )
        }

        Msg::ClassifyClicked => {
            if !model.can_classify() {
                return (model, vec![]);
            }
            let effects = match &model.upload {
                Some(upload) => vec![Effect::Classify {
                    name: upload.name.clone(),
                    image: upload.image.clone(),
                }],
                None => vec![],
            };
            (
                Model {
                    analyzing: true,
                    error: None,
                    ..model
                },
                effects,
            )
        }

        // The upload changed while this one was running.
        Msg::ClassifyDone { name, .. }
            if model.uploaded_filename.as_deref() != Some(name.as_str()) =>
        (
            Model {
                analyzing: false,
                ..model
            },
            vec![],
        ),

        Msg::ClassifyDone {
            result: Ok(result), ..
        } => (
            Model {
                results: Some(result),
                classified: true,
                analyzing: false,
                ..model
            },
            vec![],
        ),

        Msg::ClassifyDone {
            result: Err(error), ..
        } => (
            Model {
                results: None,
                classified: false,
                analyzing: false,
                error: Some(format!("Classification failed: {}", error)),
                ..model
            },
            vec![],
        ),

        Msg::DismissError => (Model { error: None, ..model }, vec![]),
    }
}

/// A different filename drops the results of the previous upload.
fn with_new_filename(model: Model, name: &str) -> Model {
    if model.uploaded_filename.as_deref() == Some(name) {
        return model;
    }

    Model {
        uploaded_filename: Some(name.to_string()),
        results: None,
        classified: false,
        ..model
    }
}
