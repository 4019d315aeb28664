//! Integration tests for OBJ/MTL/texture loading and schematic files.

use std::fs;
use std::path::PathBuf;

use image::RgbaImage;
use meshcraft_core::palette::WOOL;
use meshcraft_core::{NoProgress, Rgba, Stage, Volume, Voxelizer};
use meshcraft_io::{
    load_obj, load_schematic, save_schematic, Compression, ImageVolume, MeshError, Schematic,
};

fn temp_dir(name: &str) -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("meshcraft_{name}_{id}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const TEXTURED_TRIANGLE: &str = "\
mtllib mats/scene.mtl
v 0 0 0
v 4 0 0
v 0 4 0
vt 0.1 0.1
vt 0.9 0.1
vt 0.1 0.9
usemtl red
f 1/1 2/2 3/3
";

fn write_scene(dir: &PathBuf) -> PathBuf {
    fs::create_dir_all(dir.join("mats/tex")).unwrap();
    fs::write(dir.join("mats/scene.mtl"), "newmtl red\nKd 1 0 0\nmap_Kd tex/red.png\n").unwrap();
    RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
        .save(dir.join("mats/tex/red.png"))
        .unwrap();

    let obj = dir.join("scene.obj");
    fs::write(&obj, TEXTURED_TRIANGLE).unwrap();
    obj
}

#[test]
fn test_obj_with_material_library() {
    let dir = temp_dir("obj_mtl");
    let obj = write_scene(&dir);

    let mut stages = Vec::new();
    let mut observer = |_: Stage, done: usize, total: usize| stages.push((done, total));
    let mesh = load_obj(&obj, &mut observer).unwrap();

    assert_eq!(mesh.len(), 1);
    let tri = mesh.get(0).unwrap();
    assert_eq!(tri.color(0.5, 0.5), Rgba::new(255, 0, 0, 255));
    assert_eq!(stages.last(), Some(&(9, 9)));

    let grid = Voxelizer::new(8).voxelize(&mesh);
    for (x, y) in [(0, 0), (7, 0), (0, 7)] {
        assert_eq!(grid.voxel(x, y, 0), Rgba::new(255, 0, 0, 255));
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_texture_reports_path() {
    let dir = temp_dir("missing_tex");
    fs::create_dir_all(dir.join("mats")).unwrap();
    fs::write(dir.join("mats/scene.mtl"), "newmtl red\nmap_Kd tex/red.png\n").unwrap();
    let obj = dir.join("scene.obj");
    fs::write(&obj, TEXTURED_TRIANGLE).unwrap();

    let err = load_obj(&obj, &mut NoProgress).unwrap_err();
    match err {
        MeshError::Open { path, .. } => assert!(path.ends_with("mats/tex/red.png")),
        other => panic!("unexpected error: {other}"),
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bad_index_names_file_and_line() {
    let dir = temp_dir("bad_index");
    let obj = dir.join("broken.obj");
    fs::write(&obj, "v 0 0 0\nv 1 0 0\n\nf 1 2 3\n").unwrap();

    let err = load_obj(&obj, &mut NoProgress).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("broken.obj:4:"), "{msg}");
    assert!(msg.ends_with("invalid OBJ vertex index: 3 (out of 2)"), "{msg}");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_image_volume_from_file() {
    let dir = temp_dir("image_volume");
    let path = dir.join("wide.png");
    let mut img = RgbaImage::from_pixel(8, 4, image::Rgba([0, 0, 255, 255]));
    img.put_pixel(0, 0, image::Rgba([0, 255, 0, 255]));
    img.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
    img.put_pixel(0, 1, image::Rgba([0, 255, 0, 255]));
    img.put_pixel(1, 1, image::Rgba([0, 255, 0, 255]));
    img.save(&path).unwrap();

    let vol = ImageVolume::load(&path, 4).unwrap();
    assert_eq!((vol.width(), vol.height(), vol.depth()), (4, 2, 1));
    // top-left image corner is the highest row
    assert_eq!(vol.voxel(0, 1, 0), Rgba::new(0, 255, 0, 255));
    assert_eq!(vol.voxel(0, 0, 0), Rgba::new(0, 0, 255, 255));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_schematic_file_round_trip() {
    let dir = temp_dir("schematic");
    let obj = write_scene(&dir);
    let mesh = load_obj(&obj, &mut NoProgress).unwrap();
    let grid = Voxelizer::new(8).voxelize(&mesh);

    for (compression, file) in [(Compression::Gzip, "out.schematic"), (Compression::None, "raw.schematic")] {
        let path = dir.join(file);
        let saved = save_schematic(&grid, &WOOL, &path, compression, &mut NoProgress).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.starts_with(&[0x1f, 0x8b]), compression == Compression::Gzip);
        if compression == Compression::None {
            // compound tag, then the 9-byte root name
            assert_eq!(&bytes[..12], b"\x0a\x00\x09Schematic");
        }

        let loaded = load_schematic(&path).unwrap();
        assert_eq!(loaded, saved);
        assert_eq!((loaded.width(), loaded.height(), loaded.length()), (8, 8, 1));
        assert_eq!(loaded.non_air_count(), grid.occupied_cells());
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_rejects_garbage() {
    let dir = temp_dir("garbage");
    let path = dir.join("junk.schematic");
    fs::write(&path, [0x42, 0, 0]).unwrap();
    assert!(Schematic::load(&path).is_err());
    assert!(load_schematic(&dir.join("absent.schematic")).is_err());
    fs::remove_dir_all(&dir).ok();
}
