use super::Table;

pub const HELPER: Table = &[
    ("Add", "Add"),
    ("CentralizedDB", "Centralized DB"),
    ("CentralizedFiles", "Centralized Files"),
    ("Created", "Created"),
    ("CreatedBy", "Created by"),
    ("Creator", "Creator"),
    ("Data", "Data"),
    ("Database", "Database"),
    ("Dataset", "Dataset"),
    ("Datasets", "Datasets"),
    ("Description", "Description"),
    ("Edit", "Edit"),
    ("Expected", "Expected"),
    ("Export", "Export"),
    ("FileNames", "File names"),
    ("Files", "Files"),
    ("Helper", "Helper"),
    ("Helpers", "Helpers"),
    ("IndividualDB", "Individual DB"),
    ("Info", "Info"),
    ("Language", "Language"),
    ("Load", "Load"),
    ("Media", "Media"),
    ("MediaDirectory", "Media directory"),
    ("Modified", "Modified"),
    ("Name", "Name"),
    ("New", "New"),
    ("Other", "Other"),
    ("Overview", "Overview"),
    ("Permission", "Permission"),
    ("Print", "Print"),
    ("Report", "Report"),
    ("Reports", "Reports"),
    ("Select", "Select"),
    ("Settings", "Settings"),
    ("Source", "Source"),
    ("Sources", "Sources"),
    ("Standalone", "Standalone"),
    ("Storage", "Storage"),
    ("Tag", "Tag"),
    ("Tags", "Tags"),
    ("Template", "Template"),
    ("Title", "Title"),
    ("Type", "Type"),
    ("Updated", "Updated"),
];

pub const NAVIGATION: Table = &[
    ("Create", "Create"),
    ("CreateReport", "Create Report"),
    ("CreateTemplate", "Create Template"),
    ("Helper", "Helper"),
    ("List", "List"),
    ("Reporting", "Reporting"),
];
