/// A raw sequence record as read from a file: identifier, optional description, bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeqRecord {
    pub id: Box<str>,
    pub desc: Option<Box<str>>,
    pub seq: Vec<u8>,
}

impl SeqRecord {
    pub fn new(id: impl Into<Box<str>>, seq: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            desc: None,
            seq: seq.into(),
        }
    }

    pub fn with_desc(mut self, desc: impl Into<Box<str>>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }
}
