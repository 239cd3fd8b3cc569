// This file is part of lvfpga-tools, a set of launchers and project tools for the LabVIEW FPGA and Vivado toolchains.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// lvfpga-tools is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// lvfpga-tools is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

//! XML helpers.
//!
//! CLIP descriptions are read with `roxmltree`. Tag and attribute names are matched without
//! regard to case, as the CLIP files in the wild disagree on it. Target resource files are
//! built as an [`XmlElement`] tree and written with `quick-xml`, indented by two spaces.

use crate::error::LvfpgaError;
use crate::system_io::{fs_create_parent_dir, fs_write};
use log::info;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use roxmltree::{Document, Node};
use std::path::Path;

pub fn parse_document<'input>(
    text: &'input str,
    file: &Path,
) -> Result<Document<'input>, LvfpgaError> {
    Document::parse(text).map_err(|e| LvfpgaError::Xml {
        file: file.into(),
        message: e.to_string(),
    })
}

pub fn is_named(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

/// First child element called `name`.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| is_named(*c, name))
}

pub fn attribute(node: Node, name: &str) -> Option<String> {
    node.attributes()
        .find(|a| a.name().eq_ignore_ascii_case(name))
        .map(|a| a.value().to_string())
}

/// Text of the first child element called `name`. Missing and empty text both give `None`.
pub fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|c| c.text())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// An element of an XML file being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> XmlElement {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> XmlElement {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> XmlElement {
        self.text = Some(text.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append `child` and return it.
    pub fn push(&mut self, child: XmlElement) -> &mut XmlElement {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// The child `<tag name="name">`, appended first if there is none yet.
    pub fn named_child(&mut self, tag: &str, name: &str) -> &mut XmlElement {
        let found = self
            .children
            .iter()
            .position(|c| c.name == tag && c.attribute("name") == Some(name));
        match found {
            Some(index) => &mut self.children[index],
            None => self.push(XmlElement::new(tag).with_attribute("name", name)),
        }
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), String> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }
        if self.text.is_none() && self.children.is_empty() {
            return write_event(writer, Event::Empty(start));
        }
        write_event(writer, Event::Start(start))?;
        if let Some(text) = &self.text {
            write_event(writer, Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        write_event(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }

    /// Render the document rooted at this element, XML declaration included.
    pub fn to_xml_string(&self) -> Result<String, String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_event(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
        )?;
        self.write_to(&mut writer)?;
        let mut text = String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())?;
        text.push('\n');
        Ok(text)
    }

    /// Write the document rooted at this element to `file_path`, creating its folder.
    pub fn write_file(&self, file_path: &Path) -> Result<(), LvfpgaError> {
        let text = self.to_xml_string().map_err(|message| LvfpgaError::Xml {
            file: file_path.into(),
            message,
        })?;
        fs_create_parent_dir(file_path)?;
        fs_write(file_path, text)?;
        info!("XML written to {file_path:?}");
        Ok(())
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}
