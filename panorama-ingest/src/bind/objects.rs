use xml_tree_core::{write, WriteError, XmlNode};

use super::{
    entries_of, entry_node, member_list, members_at, members_of, meta_of, name_of, push_meta,
    push_text, text_at, text_of, BindError, FromXml, ToXml,
};
use crate::model::{
    Address, AddressGroup, ApplicationFilter, ApplicationGroup, Meta, ObjectContainer, PortSpec,
    Schedule, Service, ServiceGroup, Tag,
};

impl FromXml for ObjectContainer {
    /// Reads the object collections that sit directly under `node`
    /// (`<shared>`, a device-group entry, or a vsys entry).
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            tags: entries_of(node, "tag")?,
            addresses: entries_of(node, "address")?,
            address_groups: entries_of(node, "address-group")?,
            services: entries_of(node, "service")?,
            service_groups: entries_of(node, "service-group")?,
            application_groups: entries_of(node, "application-group")?,
            application_filters: entries_of(node, "application-filter")?,
            schedules: entries_of(node, "schedule")?,
        })
    }
}

impl ObjectContainer {
    /// Append each non-empty collection to `parent` as
    /// `<collection><entry>..</entry></collection>`.
    pub fn write_into(&self, parent: &mut XmlNode) {
        parent.push_if_populated(collection("tag", &self.tags));
        parent.push_if_populated(collection("address", &self.addresses));
        parent.push_if_populated(collection("address-group", &self.address_groups));
        parent.push_if_populated(collection("service", &self.services));
        parent.push_if_populated(collection("service-group", &self.service_groups));
        parent.push_if_populated(collection("application-group", &self.application_groups));
        parent.push_if_populated(collection("application-filter", &self.application_filters));
        parent.push_if_populated(collection("schedule", &self.schedules));
    }

    /// Emit the collections as a standalone document rooted at `wrapper`
    /// (`shared`, or a device-group `entry`), readable back through
    /// [`FromXml`].
    pub fn to_document(&self, wrapper: &str) -> Result<Vec<u8>, WriteError> {
        let mut root = XmlNode::new(wrapper);
        self.write_into(&mut root);
        write(&root)
    }
}

fn collection<T: ToXml>(tag: &str, items: &[T]) -> XmlNode {
    items
        .iter()
        .fold(XmlNode::new(tag), |node, item| node.with_child(item.to_xml()))
}

impl FromXml for Tag {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: Meta {
                description: text_of(node, "comments").unwrap_or_default(),
                tags: Vec::new(),
            },
            color: text_of(node, "color"),
        })
    }
}

impl ToXml for Tag {
    fn to_xml(&self) -> XmlNode {
        let mut node = entry_node(&self.name);
        push_text(&mut node, "color", self.color.as_deref());
        if !self.meta.description.is_empty() {
            push_text(&mut node, "comments", Some(self.meta.description.as_str()));
        }
        node
    }
}

impl FromXml for Address {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            ip_netmask: text_of(node, "ip-netmask"),
            ip_range: text_of(node, "ip-range"),
            fqdn: text_of(node, "fqdn"),
        })
    }
}

impl ToXml for Address {
    fn to_xml(&self) -> XmlNode {
        let mut node = entry_node(&self.name);
        push_text(&mut node, "ip-netmask", self.ip_netmask.as_deref());
        push_text(&mut node, "ip-range", self.ip_range.as_deref());
        push_text(&mut node, "fqdn", self.fqdn.as_deref());
        push_meta(&mut node, &self.meta);
        node
    }
}

impl FromXml for AddressGroup {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            static_members: members_of(node, "static"),
            dynamic_filter: text_at(node, &["dynamic", "filter"]),
        })
    }
}

impl ToXml for AddressGroup {
    fn to_xml(&self) -> XmlNode {
        let mut node = entry_node(&self.name);
        node.push_if_populated(member_list("static", &self.static_members));
        if let Some(filter) = &self.dynamic_filter {
            node.children.push(
                XmlNode::new("dynamic").with_child(XmlNode::new("filter").with_text(filter.as_str())),
            );
        }
        push_meta(&mut node, &self.meta);
        node
    }
}

fn port_spec(protocol: &XmlNode) -> PortSpec {
    PortSpec {
        port: text_of(protocol, "port").unwrap_or_default(),
        source_port: text_of(protocol, "source-port"),
    }
}

fn port_spec_node(tag: &str, spec: &PortSpec) -> XmlNode {
    let mut node = XmlNode::new(tag);
    push_text(&mut node, "port", Some(spec.port.as_str()).filter(|p| !p.is_empty()));
    push_text(&mut node, "source-port", spec.source_port.as_deref());
    node
}

impl FromXml for Service {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        let protocol = node.get_child("protocol");
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            tcp: protocol.and_then(|p| p.get_child("tcp")).map(port_spec),
            udp: protocol.and_then(|p| p.get_child("udp")).map(port_spec),
        })
    }
}

impl ToXml for Service {
    fn to_xml(&self) -> XmlNode {
        let mut node = entry_node(&self.name);
        let mut protocol = XmlNode::new("protocol");
        if let Some(tcp) = &self.tcp {
            protocol.children.push(port_spec_node("tcp", tcp));
        }
        if let Some(udp) = &self.udp {
            protocol.children.push(port_spec_node("udp", udp));
        }
        node.push_if_populated(protocol);
        push_meta(&mut node, &self.meta);
        node
    }
}

impl FromXml for ServiceGroup {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            members: members_of(node, "members"),
        })
    }
}

impl ToXml for ServiceGroup {
    fn to_xml(&self) -> XmlNode {
        let mut node = entry_node(&self.name);
        node.push_if_populated(member_list("members", &self.members));
        push_meta(&mut node, &self.meta);
        node
    }
}

impl FromXml for ApplicationGroup {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            members: members_of(node, "members"),
        })
    }
}

impl ToXml for ApplicationGroup {
    fn to_xml(&self) -> XmlNode {
        let mut node = entry_node(&self.name);
        node.push_if_populated(member_list("members", &self.members));
        push_meta(&mut node, &self.meta);
        node
    }
}

impl FromXml for ApplicationFilter {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            categories: members_of(node, "category"),
            subcategories: members_of(node, "subcategory"),
            technologies: members_of(node, "technology"),
            risks: members_of(node, "risk"),
        })
    }
}

impl ToXml for ApplicationFilter {
    fn to_xml(&self) -> XmlNode {
        let mut node = entry_node(&self.name);
        node.push_if_populated(member_list("category", &self.categories));
        node.push_if_populated(member_list("subcategory", &self.subcategories));
        node.push_if_populated(member_list("technology", &self.technologies));
        node.push_if_populated(member_list("risk", &self.risks));
        push_meta(&mut node, &self.meta);
        node
    }
}

impl FromXml for Schedule {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            daily: members_at(node, &["schedule-type", "recurring", "daily"]),
            non_recurring: members_at(node, &["schedule-type", "non-recurring"]),
        })
    }
}

impl ToXml for Schedule {
    fn to_xml(&self) -> XmlNode {
        let mut node = entry_node(&self.name);
        let mut schedule_type = XmlNode::new("schedule-type");
        if !self.daily.is_empty() {
            schedule_type.children.push(
                XmlNode::new("recurring").with_child(member_list("daily", &self.daily)),
            );
        }
        schedule_type.push_if_populated(member_list("non-recurring", &self.non_recurring));
        node.push_if_populated(schedule_type);
        push_meta(&mut node, &self.meta);
        node
    }
}
