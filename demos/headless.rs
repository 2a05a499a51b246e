use tilebuffer::{
    LatLng, Point, TemplateSource, TileLayer, TileLayerOptions, TileLoader, TileRequest, Viewport,
};

/// Pans and zooms a buffered tile layer without any UI and reports what it
/// asks the fetcher to do. Run with `RUST_LOG=debug` to see every update.
fn main() -> tilebuffer::Result<()> {
    env_logger::init();

    let options = TileLayerOptions {
        buffer: Some(tilebuffer::constants::RECOMMENDED_BUFFER),
        unload_invisible_tiles: true,
        ..Default::default()
    };
    let source = TemplateSource::openstreetmap().with_options(&options);
    let (loader, requests) = TileLoader::channel();
    let mut layer = TileLayer::new("osm", Box::new(source), options, loader);

    let mut viewport = Viewport::new(LatLng::new(37.7749, -122.4194), 12.0, Point::new(1280.0, 1024.0));

    let steps: [(&str, Option<Point>, Option<f64>); 4] = [
        ("initial view", None, None),
        ("pan east", Some(Point::new(300.0, 0.0)), None),
        ("pan south", Some(Point::new(0.0, 300.0)), None),
        ("zoom out", None, Some(11.0)),
    ];

    for (name, pan, zoom) in steps {
        if let Some(offset) = pan {
            viewport.pan_by(offset);
        }
        if let Some(zoom) = zoom {
            viewport.set_zoom(zoom);
        }

        let update = layer.update(&viewport)?;
        let (mut loads, mut unloads) = (0, 0);
        for request in requests.try_iter() {
            match request {
                TileRequest::Load { .. } => loads += 1,
                TileRequest::Unload { .. } => unloads += 1,
            }
        }

        println!(
            "{:<12} zoom {:?} visible {} working {} -> {} loads, {} unloads, holding {}",
            name,
            update.zoom,
            update.visible.map(|b| b.to_string()).unwrap_or_default(),
            update.working.map(|b| b.to_string()).unwrap_or_default(),
            loads,
            unloads,
            layer.tile_count()
        );
    }

    Ok(())
}
