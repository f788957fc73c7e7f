use super::output::{Output, Report};

/// A resource and its document type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedResource {
    pub id: String,
    pub type_name: String,
}

/// Resources in apply order.
#[derive(Debug)]
pub struct OrderReport {
    pub resources: Vec<OrderedResource>,
}

impl Report for OrderReport {
    fn render(&self, out: &mut dyn Output) {
        if self.resources.is_empty() {
            out.preformatted("No resources to apply");
            return;
        }

        out.section("Apply order");
        for (i, resource) in self.resources.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} ({})", resource.id, resource.type_name));
        }
    }
}
