use super::prelude::*;

#[derive(Debug)]
pub struct qSupported<'a> {
    pub features: Features<'a>,
}

impl<'a> ParseCommand<'a> for qSupported<'a> {
    fn from_packet(body: &'a [u8]) -> Option<Self> {
        let features = match body {
            [] => &[][..],
            [b':', features @ ..] => features,
            _ => return None,
        };

        Some(qSupported {
            features: Features(features),
        })
    }
}

/// The `;`-separated list of features advertised by the client.
#[derive(Debug)]
pub struct Features<'a>(&'a [u8]);

impl<'a> Features<'a> {
    pub fn into_iter(self) -> impl Iterator<Item = Result<Feature<'a>, &'static str>> + 'a {
        self.0
            .split(|&b| b == b';')
            .filter(|s| !s.is_empty())
            .map(|s| match s.split_last() {
                Some((&c, name)) if c == b'+' || c == b'-' || c == b'?' => Ok(Feature {
                    name,
                    val: None,
                    status: match c {
                        b'+' => FeatureSupported::Yes,
                        b'-' => FeatureSupported::No,
                        _ => FeatureSupported::Maybe,
                    },
                }),
                _ => {
                    let mut parts = s.splitn(2, |&b| b == b'=');
                    let name = parts.next().unwrap_or_default();
                    let val = parts.next().ok_or("missing feature val")?;
                    Ok(Feature {
                        name,
                        val: Some(val),
                        status: FeatureSupported::Yes,
                    })
                }
            })
    }
}

#[derive(PartialEq, Eq, Debug)]
pub enum FeatureSupported {
    Yes,
    No,
    Maybe,
}

#[derive(PartialEq, Eq, Debug)]
pub struct Feature<'a> {
    pub name: &'a [u8],
    pub val: Option<&'a [u8]>,
    pub status: FeatureSupported,
}
