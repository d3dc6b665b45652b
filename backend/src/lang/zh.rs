use super::Table;

pub const HELPER: Table = &[
    ("Add", "添加"),
    ("CentralizedDB", "集中式数据库"),
    ("CentralizedFiles", "集中式文件"),
    ("Created", "创建"),
    ("CreatedBy", "由...制作"),
    ("Creator", "创造者"),
    ("Data", "数据"),
    ("Database", "数据库"),
    ("Dataset", "数据集"),
    ("Datasets", "数据集"),
    ("Description", "描述"),
    ("Edit", "编辑"),
    ("Expected", "预期的"),
    ("Export", "出口"),
    ("FileNames", "文件名"),
    ("Files", "档"),
    ("Helper", "帮手"),
    ("Helpers", "助手"),
    ("IndividualDB", "个人DB"),
    ("Info", "信息"),
    ("Language", "语言"),
    ("Load", "加载"),
    ("Media", "媒体"),
    ("MediaDirectory", "媒体目录"),
    ("Modified", "修改的"),
    ("Name", "姓名"),
    ("New", "新的"),
    ("Other", "其他"),
    ("Overview", "概述"),
    ("Permission", "允许"),
    ("Print", "打印"),
    ("Report", "报告"),
    ("Reports", "报告"),
    ("Select", "选择"),
    ("Settings", "设置"),
    ("Source", "来源"),
    ("Sources", "来源"),
    ("Standalone", "独立"),
    ("Storage", "贮存"),
    ("Tag", "标签"),
    ("Tags", "标签"),
    ("Template", "模板"),
    ("Title", "标题"),
    ("Type", "类型"),
    ("Updated", "更新"),
];
