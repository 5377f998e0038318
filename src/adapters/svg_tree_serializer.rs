//! Default document-to-SVG serializer: walks the rendered node tree and
//! emits one SVG element per node, clipped to the capture region when
//! one is present.

use anyhow::Result;

use crate::core::interfaces::adapters::{DocumentSerializer, SerializeOptions};
use crate::core::models::{DocumentNode, PageDocument, Region};
use crate::global_constants::SVG_NAMESPACE;
use crate::utils::escape_xml;

pub struct SvgTreeSerializer;

impl SvgTreeSerializer {
    pub fn new() -> Self {
        Self
    }

    fn render_nodes(
        &self,
        output: &mut String,
        nodes: &[DocumentNode],
        region: Option<&Region>,
        keep_links: bool,
    ) {
        for node in nodes {
            if let Some(region) = region {
                if !node.bounds().intersects(region) {
                    continue;
                }
            }

            match node {
                DocumentNode::Text {
                    bounds,
                    content,
                    font_size,
                    color,
                } => {
                    output.push_str(&format!(
                        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                        bounds.x,
                        bounds.y + font_size,
                        font_size,
                        escape_xml(color),
                        escape_xml(content)
                    ));
                }
                DocumentNode::Image { bounds, href } => {
                    output.push_str(&format!(
                        "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"{}\"/>",
                        bounds.x,
                        bounds.y,
                        bounds.width,
                        bounds.height,
                        escape_xml(href)
                    ));
                }
                DocumentNode::Box { bounds, fill } => {
                    output.push_str(&format!(
                        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                        bounds.x,
                        bounds.y,
                        bounds.width,
                        bounds.height,
                        escape_xml(fill)
                    ));
                }
                DocumentNode::Link { href, children } => {
                    if keep_links {
                        output.push_str(&format!("<a href=\"{}\">", escape_xml(href)));
                        self.render_nodes(output, children, region, keep_links);
                        output.push_str("</a>");
                    } else {
                        self.render_nodes(output, children, region, keep_links);
                    }
                }
            }
        }
    }
}

impl DocumentSerializer for SvgTreeSerializer {
    fn serialize(&self, document: &PageDocument, options: &SerializeOptions) -> Result<String> {
        let view_box = options.region.unwrap_or(Region::new(
            0.0,
            0.0,
            document.viewport.width,
            document.viewport.height,
        ));

        let mut output = format!(
            "<svg xmlns=\"{}\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\">",
            SVG_NAMESPACE,
            view_box.x,
            view_box.y,
            view_box.width,
            view_box.height,
            view_box.width,
            view_box.height
        );
        output.push_str(&format!("<title>{}</title>", escape_xml(&document.title)));

        self.render_nodes(
            &mut output,
            &document.nodes,
            options.region.as_ref(),
            options.keep_links,
        );

        output.push_str("</svg>");
        Ok(output)
    }
}
