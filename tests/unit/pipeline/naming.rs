use super::*;

#[test]
fn base_picture_names() {
    let cfg = ProcessingConfig::default();
    let original = "basePictures/gym42/IMG_0001.JPG";
    assert_eq!(
        trimmed_path(&cfg, original),
        "basePictures/gym42/trimmed_IMG_0001.JPG"
    );
    assert_eq!(
        base_thumb_path(&cfg, original),
        "basePictures/gym42/thumb_IMG_0001.png"
    );
    assert_eq!(trimmed_path(&cfg, "wall.png"), "trimmed_wall.png");
}

#[test]
fn picture_path_reverses_to_siblings() {
    let cfg = ProcessingConfig::default();
    let artifacts =
        BaseArtifacts::from_picture_path(&cfg, "basePictures/gym42/trimmed_IMG_0001.JPG").unwrap();
    assert_eq!(artifacts.trimmed, "basePictures/gym42/trimmed_IMG_0001.JPG");
    assert_eq!(artifacts.thumbnail, "basePictures/gym42/thumb_IMG_0001.png");

    assert_eq!(
        BaseArtifacts::from_picture_path(&cfg, "basePictures/gym42/IMG_0001.JPG"),
        None
    );
    assert_eq!(BaseArtifacts::from_picture_path(&cfg, "d/trimmed_"), None);
}

#[test]
fn problem_names() {
    let cfg = ProcessingConfig::default();
    assert_eq!(completed_path(&cfg, "abc"), "problemImages/completed_abc.jpg");
    assert_eq!(problem_thumb_path(&cfg, "abc"), "problemImages/thumb_abc.jpg");
}
