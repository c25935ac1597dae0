use super::model::RadialLineVisualizer;
use cairo::Context;

/// Strokes every spoke as an open path with the shared width and cap.
pub fn draw(cr: &Context, visualizer: &RadialLineVisualizer) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.set_line_width(visualizer.line_width());
    cr.set_line_cap(visualizer.line_cap().into());

    for (segment, color) in visualizer.strokes() {
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.move_to(segment.start.x, segment.start.y);
        cr.line_to(segment.end.x, segment.end.y);
        cr.stroke()?;
    }

    cr.restore()
}
